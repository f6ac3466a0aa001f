use super::*;

use trellis_core::schema::db::View;

#[derive(Debug, Clone)]
pub struct DropView {
    pub name: Name,
}

impl Statement {
    pub fn drop_view(view: &View) -> Self {
        DropView {
            name: Name::from(&view.name),
        }
        .into()
    }
}

impl From<DropView> for Statement {
    fn from(value: DropView) -> Self {
        Self::DropView(value)
    }
}
