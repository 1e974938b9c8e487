//! Post entity for SeaORM.
//!
//! Comments and tags are embedded in the post row as JSON documents.

use quill_core::domain::Comment;
use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct EmbeddedComments(pub Vec<Comment>);

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct TagList(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub text: Option<String>,
    #[sea_orm(indexed)]
    pub publish_date: DateTimeWithTimeZone,
    #[sea_orm(nullable, indexed)]
    pub user_id: Option<Uuid>,
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: EmbeddedComments,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: TagList,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            text: model.text,
            publish_date: model.publish_date.into(),
            user_id: model.user_id,
            comments: model.comments.0,
            tags: model.tags.0,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<quill_core::domain::Post> for ActiveModel {
    fn from(post: quill_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            text: Set(post.text),
            publish_date: Set(post.publish_date.into()),
            user_id: Set(post.user_id),
            comments: Set(EmbeddedComments(post.comments)),
            tags: Set(TagList(post.tags)),
        }
    }
}
