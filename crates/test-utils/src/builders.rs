#![allow(dead_code)]

use backlog_compiler::model::{BacklogItem, Level};

/// Builder for `BacklogItem` to simplify test setup.
///
/// Priority defaults to 0; titles default to `"<id> title"` so prose is
/// never empty.
pub struct ItemBuilder {
    item: BacklogItem,
}

impl ItemBuilder {
    pub fn new(id: &str, level: Level) -> Self {
        let mut item = BacklogItem::new(id, level, 0);
        item.title = format!("{id} title");
        Self { item }
    }

    pub fn epic(id: &str) -> Self {
        Self::new(id, Level::Epic)
    }

    pub fn feature(id: &str, parent: &str) -> Self {
        Self::new(id, Level::Feature).parent(parent)
    }

    pub fn story(id: &str, parent: &str) -> Self {
        Self::new(id, Level::Story).parent(parent)
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.item.parent_id = Some(parent.to_string());
        self
    }

    pub fn no_parent(mut self) -> Self {
        self.item.parent_id = None;
        self
    }

    pub fn depends_on(mut self, dep: &str) -> Self {
        self.item.depends_on.insert(dep.to_string());
        self
    }

    pub fn priority(mut self, score: i64) -> Self {
        self.item.priority_score = score;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.item.title = title.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.item.description = description.to_string();
        self
    }

    pub fn build(self) -> BacklogItem {
        self.item
    }
}

/// Builder for a whole candidate set.
#[derive(Default)]
pub struct BacklogBuilder {
    items: Vec<BacklogItem>,
}

impl BacklogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, item: ItemBuilder) -> Self {
        self.items.push(item.build());
        self
    }

    pub fn with_item(mut self, item: BacklogItem) -> Self {
        self.items.push(item);
        self
    }

    /// One epic `E001` with one feature `F001` and the given stories under it.
    pub fn single_feature(stories: &[(&str, &[&str])]) -> Self {
        let mut builder = Self::new()
            .with(ItemBuilder::epic("E001"))
            .with(ItemBuilder::feature("F001", "E001"));
        for (id, deps) in stories {
            let mut story = ItemBuilder::story(id, "F001");
            for dep in deps.iter() {
                story = story.depends_on(dep);
            }
            builder = builder.with(story);
        }
        builder
    }

    pub fn build(self) -> Vec<BacklogItem> {
        self.items
    }
}
