//! Traced contours grouped by level.

use carto_path::Path;

/// All strands traced at one level.
#[derive(Debug, Clone)]
pub struct ContourGroup {
    pub level: f64,
    pub paths: Vec<Path>,
}

impl ContourGroup {
    pub fn new(level: f64, paths: Vec<Path>) -> Self {
        Self { level, paths }
    }

    /// Number of closed strands at this level.
    pub fn closed_count(&self) -> usize {
        self.paths.iter().filter(|p| p.is_closed()).count()
    }
}

/// Result of a tracing run: one group per level, in ascending level
/// order. Levels without strands keep an empty group.
#[derive(Debug, Clone, Default)]
pub struct ContourSet {
    groups: Vec<ContourGroup>,
}

impl ContourSet {
    pub fn new(mut groups: Vec<ContourGroup>) -> Self {
        groups.sort_by(|a, b| a.level.total_cmp(&b.level));
        Self { groups }
    }

    pub fn groups(&self) -> &[ContourGroup] {
        &self.groups
    }

    pub fn levels(&self) -> Vec<f64> {
        self.groups.iter().map(|g| g.level).collect()
    }

    /// Total number of strands across all levels.
    pub fn path_count(&self) -> usize {
        self.groups.iter().map(|g| g.paths.len()).sum()
    }

    /// Strands at exactly `level`, `None` when the level was not traced.
    pub fn paths_for(&self, level: f64) -> Option<&[Path]> {
        self.groups
            .iter()
            .find(|g| g.level == level)
            .map(|g| g.paths.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContourGroup> {
        self.groups.iter()
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_groups(self) -> Vec<ContourGroup> {
        self.groups
    }
}

impl<'a> IntoIterator for &'a ContourSet {
    type Item = &'a ContourGroup;
    type IntoIter = std::slice::Iter<'a, ContourGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl IntoIterator for ContourSet {
    type Item = ContourGroup;
    type IntoIter = std::vec::IntoIter<ContourGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carto_common::Point;

    fn line() -> Path {
        Path::from_polyline(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0)], false)
    }

    fn triangle() -> Path {
        Path::from_polyline(
            &[
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(0.0, 1.0),
            ],
            true,
        )
    }

    #[test]
    fn test_groups_sorted_by_level() {
        let set = ContourSet::new(vec![
            ContourGroup::new(20.0, vec![line()]),
            ContourGroup::new(-10.0, vec![]),
            ContourGroup::new(0.0, vec![line(), triangle()]),
        ]);
        assert_eq!(set.levels(), vec![-10.0, 0.0, 20.0]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.path_count(), 3);
        assert_eq!(set.groups()[1].closed_count(), 1);
    }

    #[test]
    fn test_paths_for() {
        let set = ContourSet::new(vec![ContourGroup::new(5.0, vec![line()])]);
        assert_eq!(set.paths_for(5.0).map(|p| p.len()), Some(1));
        assert!(set.paths_for(6.0).is_none());
    }

    #[test]
    fn test_iteration() {
        let set = ContourSet::new(vec![
            ContourGroup::new(1.0, vec![line()]),
            ContourGroup::new(2.0, vec![]),
        ]);
        let mut seen = Vec::new();
        for group in &set {
            seen.push((group.level, group.paths.len()));
        }
        assert_eq!(seen, vec![(1.0, 1), (2.0, 0)]);

        let owned: Vec<_> = set.into_iter().map(|g| g.level).collect();
        assert_eq!(owned, vec![1.0, 2.0]);
        assert!(ContourSet::default().is_empty());
    }
}
