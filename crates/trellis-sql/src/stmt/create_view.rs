use super::*;

use trellis_core::schema::db::View;

/// `CREATE OR REPLACE VIEW`
#[derive(Debug, Clone)]
pub struct CreateView {
    pub view: View,
}

impl Statement {
    pub fn create_view(view: &View) -> Self {
        CreateView { view: view.clone() }.into()
    }
}

impl From<CreateView> for Statement {
    fn from(value: CreateView) -> Self {
        Self::CreateView(value)
    }
}
