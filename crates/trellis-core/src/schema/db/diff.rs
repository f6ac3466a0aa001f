use std::collections::HashMap;

/// Schema objects matched across versions by their deterministic name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Differences between two lists of named objects. An object present in
/// both lists under the same name but with a different definition is an
/// alteration, which PostgreSQL applies as a drop followed by a create.
pub struct NamedDiff<'a, T> {
    items: Vec<NamedDiffItem<'a, T>>,
}

pub enum NamedDiffItem<'a, T> {
    Create(&'a T),
    Drop(&'a T),
    Alter { from: &'a T, to: &'a T },
}

impl<'a, T: Named + PartialEq> NamedDiff<'a, T> {
    pub fn from(from: &'a [T], to: &'a [T]) -> Self {
        Self::from_with(from, to, |_| false)
    }

    /// Like [`NamedDiff::from`], additionally treating any object for which
    /// `force` returns `true` as altered even when its definition is
    /// unchanged.
    pub fn from_with(from: &'a [T], to: &'a [T], force: impl Fn(&T) -> bool) -> Self {
        let mut items = vec![];

        let from_map = HashMap::<&str, &'a T>::from_iter(from.iter().map(|from| (from.name(), from)));
        let to_map = HashMap::<&str, &'a T>::from_iter(to.iter().map(|to| (to.name(), to)));

        for from in from {
            match to_map.get(from.name()) {
                Some(to) => {
                    if from != *to || force(to) {
                        items.push(NamedDiffItem::Alter { from, to });
                    }
                }
                None => items.push(NamedDiffItem::Drop(from)),
            }
        }

        for to in to {
            if !from_map.contains_key(to.name()) {
                items.push(NamedDiffItem::Create(to));
            }
        }

        Self { items }
    }
}

impl<'a, T> NamedDiff<'a, T> {
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedDiffItem<'a, T>> {
        self.items.iter()
    }

    /// Objects that must be removed: dropped ones and the previous version of
    /// altered ones.
    pub fn dropped(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.items.iter().filter_map(|item| match *item {
            NamedDiffItem::Drop(from) | NamedDiffItem::Alter { from, .. } => Some(from),
            NamedDiffItem::Create(_) => None,
        })
    }

    /// Objects that must be created: new ones and the next version of
    /// altered ones.
    pub fn created(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.items.iter().filter_map(|item| match *item {
            NamedDiffItem::Create(to) | NamedDiffItem::Alter { to, .. } => Some(to),
            NamedDiffItem::Drop(_) => None,
        })
    }
}
