use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 问题模板表（id 由种子数据指定，不自增）
        manager
            .create_table(
                Table::create()
                    .table(Question::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Question::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Question::Template).text().not_null())
                    .col(ColumnDef::new(Question::Description).text().null())
                    .col(ColumnDef::new(Question::Category).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Question::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Question::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_display_order")
                    .table(Question::Table)
                    .col(Question::DisplayOrder)
                    .to_owned(),
            )
            .await?;

        // 分享链接表
        manager
            .create_table(
                Table::create()
                    .table(Link::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Link::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Link::Hash).string_len(32).not_null())
                    .col(ColumnDef::new(Link::QuestionId).integer().not_null())
                    .col(
                        ColumnDef::new(Link::Used)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Link::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Link::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_links_question_id")
                            .from(Link::Table, Link::QuestionId)
                            .to(Question::Table, Question::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // hash 唯一索引：并发签发时由数据库拒绝重复 hash
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_hash")
                    .table(Link::Table)
                    .col(Link::Hash)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_question_id")
                    .table(Link::Table)
                    .col(Link::QuestionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 索引随表一起删除；先删子表再删父表
        manager
            .drop_table(Table::drop().table(Link::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Question::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Question {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    Template,
    Description,
    Category,
    DisplayOrder,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Link {
    #[sea_orm(iden = "links")]
    Table,
    Id,
    Hash,
    QuestionId,
    Used,
    CreatedAt,
    ExpiresAt,
}
