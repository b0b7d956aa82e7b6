use crate::query::{
    ast::insert::Insert,
    renderer::{Render, Renderer},
};

impl Render for Insert {
    fn render(&self, r: &mut Renderer) {
        // 1. INSERT INTO table (...)
        r.sql.push_str("INSERT INTO ");
        r.render_table_ref(&self.table);
        r.sql.push_str(" (");
        let quoted_columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| r.dialect.quote_identifier(c))
            .collect();
        r.sql.push_str(&quoted_columns.join(", "));
        r.sql.push(')');

        // 2. VALUES (...)
        if !self.values.is_empty() {
            render_values(self, r);
        }
        r.sql.push(';');
    }
}

fn render_values(insert: &Insert, r: &mut Renderer) {
    r.sql.push_str(" VALUES ");
    for (i, row) in insert.values.iter().enumerate() {
        if i > 0 {
            r.sql.push_str(", ");
        }
        r.sql.push('(');
        for (j, val) in row.iter().enumerate() {
            if j > 0 {
                r.sql.push_str(", ");
            }
            val.render(r);
        }
        r.sql.push(')');
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::common::TableRef,
        builder::insert::InsertBuilder,
        dialect::{MySql, Postgres},
        renderer::{Render, Renderer},
        value, values,
    };
    use model::core::value::Value;

    #[test]
    fn test_render_batch_insert_postgres() {
        let ast = InsertBuilder::new(TableRef::qualified("dbo", "people"))
            .columns(&["ID", "Name"])
            .values(vec![value(Value::Int32(1)), value(Value::String("Ada".into()))])
            .values(values(vec![Value::Int32(2), Value::Null]))
            .build();

        let mut renderer = Renderer::new(&Postgres);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(
            sql,
            r#"INSERT INTO "dbo"."people" ("ID", "Name") VALUES ($1, $2), ($3, $4);"#
        );
        assert_eq!(
            params,
            vec![
                Value::Int32(1),
                Value::String("Ada".into()),
                Value::Int32(2),
                Value::Null
            ]
        );
    }

    #[test]
    fn test_render_single_insert_mysql() {
        let ast = InsertBuilder::new(TableRef::qualified("app", "people"))
            .columns(&["ID", "Name"])
            .values(vec![value(Value::Int32(3)), value(Value::String("C".into()))])
            .build();

        let mut renderer = Renderer::new(&MySql);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(sql, "INSERT INTO `app`.`people` (`ID`, `Name`) VALUES (?, ?);");
        assert_eq!(params.len(), 2);
    }
}
