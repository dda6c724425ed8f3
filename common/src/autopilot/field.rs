use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::debug;
use crate::games::snake::{FieldSize, Point};
use super::error::AutopilotError;
use super::hint::{CycleMode, DirectionHint, compute_hint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub mode: CycleMode,
    pub width: usize,
    pub height: usize,
}

impl FieldKey {
    pub fn new(mode: CycleMode, width: usize, height: usize) -> Result<Self, AutopilotError> {
        if width < 2 || height < 2 {
            return Err(AutopilotError::configuration(format!(
                "board must be at least 2x2, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            mode,
            width,
            height,
        })
    }

    pub fn field_size(&self) -> FieldSize {
        FieldSize::new(self.width, self.height)
    }
}

/// Immutable hint per cell, row-major.
#[derive(Debug, PartialEq, Eq)]
pub struct HintField {
    key: FieldKey,
    hints: Vec<DirectionHint>,
}

impl HintField {
    pub fn build(key: FieldKey) -> Result<Self, AutopilotError> {
        let size = key.field_size();
        let hints: Vec<DirectionHint> = size
            .points()
            .map(|p| compute_hint(p.x, p.y, key.width, key.height, key.mode))
            .collect();

        if let Some(index) = hints.iter().position(DirectionHint::is_degenerate) {
            return Err(AutopilotError::invariant(format!(
                "{} field {}x{} has a degenerate hint at ({}, {})",
                key.mode,
                key.width,
                key.height,
                index % key.width,
                index / key.width
            )));
        }

        Ok(Self { key, hints })
    }

    pub fn key(&self) -> FieldKey {
        self.key
    }

    pub fn size(&self) -> FieldSize {
        self.key.field_size()
    }

    pub fn mode(&self) -> CycleMode {
        self.key.mode
    }

    /// Panics on out-of-bounds points; callers validate positions first.
    pub fn hint(&self, point: Point) -> DirectionHint {
        self.hints[self.size().index(point)]
    }

    /// Grid of hints indexed `[y][x]`, for diagnostic display.
    pub fn rows(&self) -> Vec<Vec<DirectionHint>> {
        self.hints
            .chunks(self.key.width)
            .map(|row| row.to_vec())
            .collect()
    }

    pub fn render(&self) -> String {
        self.hints
            .chunks(self.key.width)
            .map(|row| row.iter().map(DirectionHint::arrow).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Build-once store of hint fields, shareable between engines.
#[derive(Default)]
pub struct FieldCache {
    fields: Mutex<HashMap<FieldKey, Arc<HintField>>>,
}

impl FieldCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the field for `key`, building it under the lock if absent so a
    /// key is never constructed twice.
    pub fn get_or_build(&self, key: FieldKey) -> Result<Arc<HintField>, AutopilotError> {
        let mut fields = self
            .fields
            .lock()
            .map_err(|_| AutopilotError::invariant("field cache lock poisoned"))?;

        if let Some(field) = fields.get(&key) {
            return Ok(Arc::clone(field));
        }

        let field = Arc::new(HintField::build(key)?);
        debug!("Built {} hint field for {}x{}", key.mode, key.width, key.height);
        fields.insert(key, Arc::clone(&field));
        Ok(field)
    }

    pub fn get(&self, key: &FieldKey) -> Option<Arc<HintField>> {
        self.fields.lock().ok()?.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.fields.lock().map(|fields| fields.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn key(mode: CycleMode, width: usize, height: usize) -> FieldKey {
        FieldKey::new(mode, width, height).unwrap()
    }

    #[test]
    fn test_key_rejects_boards_below_2x2() {
        assert!(matches!(
            FieldKey::new(CycleMode::Full, 1, 5),
            Err(AutopilotError::Configuration(_))
        ));
        assert!(FieldKey::new(CycleMode::Improved, 3, 0).is_err());
    }

    #[test]
    fn test_independent_builds_are_identical() {
        for mode in CycleMode::ALL {
            let first = HintField::build(key(mode, 7, 5)).unwrap();
            let second = HintField::build(key(mode, 7, 5)).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_cache_builds_each_key_once() {
        let cache = FieldCache::new();
        let improved = key(CycleMode::Improved, 6, 6);
        assert!(cache.get(&improved).is_none());

        let first = cache.get_or_build(improved).unwrap();
        let second = cache.get_or_build(improved).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.key(), improved);
        assert!(cache.get(&improved).is_some_and(|cached| Arc::ptr_eq(&cached, &first)));
        assert!(cache.get(&key(CycleMode::Full, 6, 6)).is_none());
        assert_eq!(cache.len(), 1);

        cache.get_or_build(key(CycleMode::Full, 6, 6)).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cache_shared_across_threads_yields_one_field() {
        let cache = Arc::new(FieldCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_build(key(CycleMode::Improved, 12, 8)).unwrap())
            })
            .collect();
        let fields: Vec<Arc<HintField>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(fields.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_rows_and_render_follow_grid_layout() {
        let field = HintField::build(key(CycleMode::Full, 4, 4)).unwrap();
        let rows = field.rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3][0], DirectionHint::RIGHT);
        assert_eq!(field.hint(Point::new(3, 1)), DirectionHint::UP);
        assert_eq!(field.render(), "↓←←←\n↓→→↑\n↓↑←←\n→→→↑");
    }
}
