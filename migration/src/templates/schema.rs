use sea_orm_migration::prelude::*;

use crate::EntryPoint;

pub struct Script;

#[async_trait::async_trait]
impl EntryPoint for Script {
    async fn up(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // 在此编写表结构变更，参数改名为 manager 后使用，例如:
        // use sea_orm_migration::schema::*;
        //
        // manager
        //     .create_table(
        //         Table::create()
        //             .table(Alias::new("my_table"))
        //             .if_not_exists()
        //             .col(pk_auto(Alias::new("id")))
        //             .col(string(Alias::new("name")))
        //             .to_owned(),
        //     )
        //     .await?;
        Ok(())
    }
}
