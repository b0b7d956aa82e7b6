use crate::query::{
    ast::create_table::CreateTable,
    renderer::{Render, Renderer},
};

impl Render for CreateTable {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("CREATE TABLE ");
        if self.if_not_exists {
            r.sql.push_str("IF NOT EXISTS ");
        }
        r.render_table_ref(&self.table);
        r.sql.push_str(" (");

        let columns = self
            .columns
            .iter()
            .map(|col| {
                let mut def = format!(
                    "{} {}",
                    r.dialect.quote_identifier(&col.name),
                    r.dialect.render_data_type(&col.data_type, col.max_length)
                );
                if !col.is_nullable {
                    def.push_str(" NOT NULL");
                }
                def
            })
            .collect::<Vec<_>>();
        r.sql.push_str(&columns.join(", "));
        r.sql.push_str(");");
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::{common::TableRef, create_table::CreateTable},
        builder::create_table::CreateTableBuilder,
        dialect::{MySql, Postgres},
        renderer::{Render, Renderer},
    };
    use model::core::data_type::DataType;

    fn people() -> CreateTable {
        CreateTableBuilder::new(TableRef::qualified("dbo", "people"))
            .column("ID", DataType::Integer, None)
            .column("Name", DataType::VarChar, Some(255))
            .if_not_exists()
            .build()
    }

    #[test]
    fn test_render_create_table_postgres() {
        let mut renderer = Renderer::new(&Postgres);
        people().render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert!(params.is_empty());
        assert_eq!(
            sql,
            r#"CREATE TABLE IF NOT EXISTS "dbo"."people" ("ID" INTEGER, "Name" VARCHAR(255));"#
        );
    }

    #[test]
    fn test_render_create_table_mysql() {
        let mut renderer = Renderer::new(&MySql);
        people().render(&mut renderer);
        let (sql, _) = renderer.finish();

        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS `dbo`.`people` (`ID` INT, `Name` VARCHAR(255));"
        );
    }
}
