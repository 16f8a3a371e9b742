use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, sea_query::OnConflict};

use crate::storage::QuestionSeed;
use migration::entities::question;

/// 使用 ON CONFLICT(id) 的批量 upsert
///
/// 已存在的行只更新内容字段，`created_at` 保留首次写入的值。
pub async fn upsert_questions(
    db: &DatabaseConnection,
    seeds: &[QuestionSeed],
    now: DateTime<Utc>,
) -> Result<(), DbErr> {
    use sea_orm::ActiveValue::Set;

    if seeds.is_empty() {
        return Ok(());
    }

    let models = seeds.iter().map(|seed| question::ActiveModel {
        id: Set(seed.id),
        template: Set(seed.template.clone()),
        description: Set(seed.description.clone()),
        category: Set(seed.category.clone()),
        display_order: Set(seed.order),
        created_at: Set(now),
    });

    question::Entity::insert_many(models)
        .on_conflict(
            OnConflict::column(question::Column::Id)
                .update_columns([
                    question::Column::Template,
                    question::Column::Description,
                    question::Column::Category,
                    question::Column::DisplayOrder,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(())
}
