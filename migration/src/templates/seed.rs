use sea_orm_migration::prelude::*;

use crate::EntryPoint;

pub struct Script;

#[async_trait::async_trait]
impl EntryPoint for Script {
    async fn up(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // 在此编写数据填充，先检查再插入以保持幂等，参数改名为 manager 后使用，例如:
        // use sea_orm_migration::sea_orm::ConnectionTrait;
        //
        // let db = manager.get_connection();
        // let backend = manager.get_database_backend();
        // let exists = Query::select()
        //     .column(Alias::new("id"))
        //     .from(Alias::new("my_table"))
        //     .limit(1)
        //     .to_owned();
        // if db.query_one_raw(backend.build(&exists)).await?.is_none() {
        //     let insert = Query::insert()
        //         .into_table(Alias::new("my_table"))
        //         .columns([Alias::new("name")])
        //         .values_panic(["Sample Data".into()])
        //         .to_owned();
        //     manager.exec_stmt(insert).await?;
        // }
        Ok(())
    }
}
