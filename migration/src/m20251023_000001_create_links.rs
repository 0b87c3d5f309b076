use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 links 表
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
                    .col(ColumnDef::new(Link::Url).text().not_null())
                    .col(ColumnDef::new(Link::Code).string_len(64).not_null())
                    .col(ColumnDef::new(Link::Title).text().not_null())
                    .col(ColumnDef::new(Link::BaseUrl).string().not_null())
                    .col(
                        ColumnDef::new(Link::Visits)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Link::CreatedAt)
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
                    .name("idx_links_code")
                    .table(Link::Table)
                    .col(Link::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // MySQL 不能对 TEXT 列建唯一索引，去重只靠服务层的 url 查询
        if manager.get_database_backend() != DatabaseBackend::MySql {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_links_url")
                        .table(Link::Table)
                        .col(Link::Url)
                        .unique()
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_created_at")
                    .table(Link::Table)
                    .col(Link::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Link::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Link {
    #[sea_orm(iden = "links")]
    Table,
    Id,
    Url,
    Code,
    Title,
    BaseUrl,
    Visits,
    CreatedAt,
}
