use model::{
    core::{data_type::DataType, identifiers::TableRef, value::Value},
    records::row::{NAME_MAX_LENGTH, Row},
};
use planner::query::{
    ast::{self, delete::Delete, select::Select},
    builder::{create_table::CreateTableBuilder, insert::InsertBuilder},
    columns,
    dialect::Dialect,
    renderer::{Render, Renderer},
    values,
};

pub const ID_COLUMN: &str = "ID";
pub const NAME_COLUMN: &str = "Name";

pub struct QueryGenerator<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> QueryGenerator<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    pub fn create_table(&self, table: &TableRef) -> String {
        let ast = CreateTableBuilder::new(Self::table(table))
            .column(ID_COLUMN, DataType::Integer, None)
            .column(NAME_COLUMN, DataType::VarChar, Some(NAME_MAX_LENGTH))
            .if_not_exists()
            .build();
        self.render_ast(ast).0
    }

    pub fn delete_all(&self, table: &TableRef) -> String {
        let ast = Delete {
            table: Self::table(table),
        };
        self.render_ast(ast).0
    }

    pub fn insert_row(&self, table: &TableRef, row: &Row) -> (String, Vec<Value>) {
        let ast = InsertBuilder::new(Self::table(table))
            .columns(&[ID_COLUMN, NAME_COLUMN])
            .values(values(row.values()))
            .build();
        self.render_ast(ast)
    }

    pub fn select_all(&self, table: &TableRef) -> String {
        let ast = Select {
            columns: columns(&[ID_COLUMN, NAME_COLUMN]),
            from: Some(Self::table(table)),
        };
        self.render_ast(ast).0
    }

    fn table(table: &TableRef) -> ast::common::TableRef {
        ast::common::TableRef::from(table)
    }

    fn render_ast(&self, ast: impl Render) -> (String, Vec<Value>) {
        let mut renderer = Renderer::new(self.dialect);
        ast.render(&mut renderer);
        renderer.finish()
    }
}
