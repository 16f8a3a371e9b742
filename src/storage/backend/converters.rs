use crate::storage::{Link, NewLink, Question};
use migration::entities::{link, question};

pub fn question_model_to_question(model: question::Model) -> Question {
    Question {
        id: model.id,
        template: model.template,
        description: model.description,
        category: model.category,
        order: model.display_order,
        created_at: model.created_at,
    }
}

pub fn link_model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        hash: model.hash,
        question_id: model.question_id,
        used: model.used,
        created_at: model.created_at,
        expires_at: model.expires_at,
    }
}

/// 新链接的 ActiveModel，id 由数据库分配，used 固定为 false
pub fn new_link_to_active_model(new_link: &NewLink) -> link::ActiveModel {
    use sea_orm::ActiveValue::*;

    link::ActiveModel {
        id: NotSet,
        hash: Set(new_link.hash.clone()),
        question_id: Set(new_link.question_id),
        used: Set(false),
        created_at: Set(new_link.created_at),
        expires_at: Set(new_link.expires_at),
    }
}
