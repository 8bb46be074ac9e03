use crate::catalog::{self, Unit};

/// Unit filter plus the topic chip picked inside it.
///
/// The topic is always one of the selected unit's topics, or `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitTopicSelection {
    unit: Option<&'static Unit>,
    topic: Option<&'static str>,
}

impl UnitTopicSelection {
    pub fn unit(&self) -> Option<&'static Unit> {
        self.unit
    }

    pub fn topic(&self) -> Option<&'static str> {
        self.topic
    }

    /// Topics offered for the current unit; empty when none is selected.
    pub fn topics(&self) -> &'static [&'static str] {
        self.unit
            .map(|u| catalog::topics_for(u.id))
            .unwrap_or(&[])
    }

    /// Select a unit by id. Unknown ids clear the selection. Any previous
    /// topic is dropped because it belonged to the old unit.
    pub fn select_unit(&mut self, id: &str) {
        self.unit = catalog::unit(id);
        self.topic = None;
    }

    /// Step through the unit list, wrapping at either end.
    pub fn cycle_unit(&mut self, forward: bool) {
        let units = &catalog::UNITS;
        let next = match self.unit.and_then(|u| units.iter().position(|x| x.id == u.id)) {
            None if forward => 0,
            None => units.len() - 1,
            Some(i) if forward => (i + 1) % units.len(),
            Some(i) => (i + units.len() - 1) % units.len(),
        };
        self.select_unit(units[next].id);
    }

    /// Pick a topic chip. Picking the active chip again clears it; picking a
    /// topic outside the current unit does nothing.
    pub fn toggle_topic(&mut self, topic: &str) {
        let Some(&found) = self.topics().iter().find(|t| **t == topic) else {
            return;
        };
        self.topic = if self.topic == Some(found) {
            None
        } else {
            Some(found)
        };
    }

    pub fn clear(&mut self) {
        self.unit = None;
        self.topic = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_follow_unit() {
        let mut selection = UnitTopicSelection::default();
        assert!(selection.topics().is_empty());

        selection.select_unit("2");
        assert_eq!(
            selection.topics(),
            &["Binary Trees", "BST", "AVL Trees", "Graph Algorithms"]
        );

        selection.select_unit("42");
        assert!(selection.unit().is_none());
        assert!(selection.topics().is_empty());
    }

    #[test]
    fn test_toggle_topic_twice_clears_it() {
        let mut selection = UnitTopicSelection::default();
        selection.select_unit("1");

        selection.toggle_topic("Stacks");
        assert_eq!(selection.topic(), Some("Stacks"));
        selection.toggle_topic("Stacks");
        assert_eq!(selection.topic(), None);
    }

    #[test]
    fn test_other_topic_replaces_active_one() {
        let mut selection = UnitTopicSelection::default();
        selection.select_unit("3");
        selection.toggle_topic("Quick Sort");
        selection.toggle_topic("Merge Sort");
        assert_eq!(selection.topic(), Some("Merge Sort"));
    }

    #[test]
    fn test_topic_must_belong_to_unit() {
        let mut selection = UnitTopicSelection::default();
        selection.toggle_topic("Heaps");
        assert_eq!(selection.topic(), None);

        selection.select_unit("1");
        selection.toggle_topic("Heaps");
        assert_eq!(selection.topic(), None);

        selection.toggle_topic("Arrays");
        selection.select_unit("4");
        assert_eq!(selection.topic(), None);
    }

    #[test]
    fn test_cycle_unit_wraps() {
        let mut selection = UnitTopicSelection::default();
        selection.cycle_unit(false);
        assert_eq!(selection.unit().map(|u| u.id), Some("4"));
        selection.cycle_unit(true);
        assert_eq!(selection.unit().map(|u| u.id), Some("1"));
        selection.cycle_unit(true);
        assert_eq!(selection.unit().map(|u| u.id), Some("2"));
    }
}
