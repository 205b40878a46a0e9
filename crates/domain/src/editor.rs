use crate::{
    ExerciseID, IndexError, Name, Reps, RoutineEntryRecord, Sets, SupersetID, Time, Weight,
};

/// In-memory state of the routine authoring form.
///
/// The editor owns an ordered list of exercise entries and is the only
/// actor that mutates it during an editing session. Entry positions are
/// implicit in the list order and derived freshly on serialization.
/// Superset tokens are minted from a per-editor counter and never reused
/// for a different chain within one session, even after the chain that
/// held them is fully dissolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineEditor {
    entries: Vec<RoutineEntry>,
    next_superset_id: SupersetID,
}

impl Default for RoutineEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// One exercise placed in the routine under edit. The name is a cached
/// copy of the exercise name at add-time, kept for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineEntry {
    pub exercise_id: ExerciseID,
    pub name: Name,
    pub target_sets: Sets,
    pub target_reps: Reps,
    pub target_weight: Weight,
    pub rest: Time,
    pub notes: String,
    pub superset_id: Option<SupersetID>,
}

impl RoutineEntry {
    #[must_use]
    pub fn new(exercise_id: ExerciseID, name: Name) -> Self {
        Self {
            exercise_id,
            name,
            target_sets: Sets::DEFAULT,
            target_reps: Reps::DEFAULT,
            target_weight: Weight::default(),
            rest: Time::DEFAULT_REST,
            notes: String::new(),
            superset_id: None,
        }
    }

    /// Rebuilds an entry from a persisted record and the display name of
    /// the referenced exercise. Stored superset tokens are reused as-is.
    #[must_use]
    pub fn from_record(record: &RoutineEntryRecord, name: Name) -> Self {
        Self {
            exercise_id: record.exercise_id,
            name,
            target_sets: record.target_sets,
            target_reps: record.target_reps,
            target_weight: record.target_weight,
            rest: record.rest,
            notes: record.notes.clone(),
            superset_id: record.superset_id,
        }
    }
}

/// The entry fields reachable through [`RoutineEditor::update_entry`].
/// Superset membership and position are deliberately absent; they change
/// only via [`RoutineEditor::toggle_superset`] and
/// [`RoutineEditor::reorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum EntryField {
    TargetSets(Sets),
    TargetReps(Reps),
    TargetWeight(Weight),
    Rest(Time),
    Notes(String),
}

impl RoutineEditor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_superset_id: SupersetID::FIRST,
        }
    }

    /// Hydrates the editor from a previously persisted, position-sorted
    /// entry list. The counter is initialized past the largest stored
    /// superset token so later joins cannot collide with hydrated chains.
    #[must_use]
    pub fn from_entries(entries: Vec<RoutineEntry>) -> Self {
        let next_superset_id = entries
            .iter()
            .filter_map(|e| e.superset_id)
            .max()
            .map_or(SupersetID::FIRST, SupersetID::next);
        Self {
            entries,
            next_superset_id,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[RoutineEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry with default targets and no superset.
    pub fn add_entry(&mut self, exercise_id: ExerciseID, name: Name) {
        self.entries.push(RoutineEntry::new(exercise_id, name));
    }

    /// Deletes and returns the entry at `index`.
    ///
    /// Superset membership of the remaining entries is left untouched,
    /// so removing the middle of a chain leaves its ends tagged with the
    /// same token without being adjacent. The form re-establishes
    /// groupings explicitly if that matters to the user.
    pub fn remove_entry(&mut self, index: usize) -> Result<RoutineEntry, IndexError> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    pub fn update_entry(&mut self, index: usize, field: EntryField) -> Result<(), IndexError> {
        self.check_index(index)?;
        let entry = &mut self.entries[index];
        match field {
            EntryField::TargetSets(target_sets) => entry.target_sets = target_sets,
            EntryField::TargetReps(target_reps) => entry.target_reps = target_reps,
            EntryField::TargetWeight(target_weight) => entry.target_weight = target_weight,
            EntryField::Rest(rest) => entry.rest = rest,
            EntryField::Notes(notes) => entry.notes = notes,
        }
        Ok(())
    }

    /// Links the entry at `index` with its predecessor, or unlinks it if
    /// it is already part of a superset.
    ///
    /// Unlinking clears the entry itself and then every immediately
    /// following entry carrying the same token. Entries before `index`
    /// are never touched, so dissolving in the middle of a chain leaves
    /// the head of the chain grouped.
    ///
    /// The first entry has no predecessor; calling with `index == 0` is
    /// a no-op.
    pub fn toggle_superset(&mut self, index: usize) -> Result<(), IndexError> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(());
        }

        if let Some(superset_id) = self.entries[index].superset_id {
            self.entries[index].superset_id = None;
            for entry in &mut self.entries[index + 1..] {
                if entry.superset_id == Some(superset_id) {
                    entry.superset_id = None;
                } else {
                    break;
                }
            }
        } else {
            let superset_id = match self.entries[index - 1].superset_id {
                Some(superset_id) => superset_id,
                None => {
                    let superset_id = self.next_superset_id;
                    self.next_superset_id = superset_id.next();
                    self.entries[index - 1].superset_id = Some(superset_id);
                    superset_id
                }
            };
            self.entries[index].superset_id = Some(superset_id);
        }
        Ok(())
    }

    /// Moves the entry at `from` to position `to`, shifting the entries
    /// in between.
    ///
    /// Every superset is dissolved: adjacency is the sole criterion for
    /// group validity, and a reordering can silently break or fabricate
    /// adjacency in ways the user did not intend. Groupings must be
    /// re-established explicitly afterwards.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), IndexError> {
        self.check_index(from)?;
        self.check_index(to)?;

        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);

        for entry in &mut self.entries {
            entry.superset_id = None;
        }
        Ok(())
    }

    /// Produces the persistence-ready records, with positions derived
    /// from the current list order.
    #[must_use]
    pub fn records(&self) -> Vec<RoutineEntryRecord> {
        self.entries
            .iter()
            .enumerate()
            .map(|(position, entry)| RoutineEntryRecord {
                exercise_id: entry.exercise_id,
                #[allow(clippy::cast_possible_truncation)]
                position: position as u32,
                target_sets: entry.target_sets,
                target_reps: entry.target_reps,
                target_weight: entry.target_weight,
                rest: entry.rest,
                notes: entry.notes.clone(),
                superset_id: entry.superset_id,
            })
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<(), IndexError> {
        let len = self.entries.len();
        if index >= len {
            return Err(IndexError::OutOfRange { index, len });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn editor(names: &[&str]) -> RoutineEditor {
        let mut editor = RoutineEditor::new();
        for (i, name) in names.iter().enumerate() {
            editor.add_entry((i as u128 + 1).into(), Name::new(name).unwrap());
        }
        editor
    }

    fn superset_ids(editor: &RoutineEditor) -> Vec<Option<u32>> {
        editor
            .entries()
            .iter()
            .map(|e| e.superset_id.map(u32::from))
            .collect()
    }

    fn names(editor: &RoutineEditor) -> Vec<&str> {
        editor.entries().iter().map(|e| e.name.as_ref()).collect()
    }

    #[test]
    fn test_add_entry_defaults() {
        let editor = editor(&["Bench Press"]);

        assert_eq!(editor.len(), 1);
        assert_eq!(
            editor.entries()[0],
            RoutineEntry {
                exercise_id: 1.into(),
                name: Name::new("Bench Press").unwrap(),
                target_sets: Sets::new(3).unwrap(),
                target_reps: Reps::new(10).unwrap(),
                target_weight: Weight::default(),
                rest: Time::new(60).unwrap(),
                notes: String::new(),
                superset_id: None,
            }
        );
    }

    #[test]
    fn test_default_editor_mints_from_one() {
        let mut editor = RoutineEditor::default();
        editor.add_entry(1.into(), Name::new("A").unwrap());
        editor.add_entry(2.into(), Name::new("B").unwrap());

        editor.toggle_superset(1).unwrap();

        assert_eq!(superset_ids(&editor), vec![Some(1), Some(1)]);
    }

    #[test]
    fn test_positions_follow_list_order() {
        let mut editor = editor(&["A", "B", "C", "D"]);
        editor.remove_entry(1).unwrap();
        editor.add_entry(5.into(), Name::new("E").unwrap());
        editor.reorder(0, 3).unwrap();

        let records = editor.records();
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.position, i as u32);
        }
    }

    #[test]
    fn test_remove_entry_out_of_range() {
        let mut editor = editor(&["A", "B"]);
        let before = editor.clone();

        assert_eq!(
            editor.remove_entry(2),
            Err(IndexError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(editor, before);
    }

    #[test]
    fn test_update_entry() {
        let mut editor = editor(&["A"]);

        editor
            .update_entry(0, EntryField::TargetSets(Sets::new(5).unwrap()))
            .unwrap();
        editor
            .update_entry(0, EntryField::TargetReps(Reps::new(5).unwrap()))
            .unwrap();
        editor
            .update_entry(0, EntryField::TargetWeight(Weight::new(100.0).unwrap()))
            .unwrap();
        editor
            .update_entry(0, EntryField::Rest(Time::new(180).unwrap()))
            .unwrap();
        editor
            .update_entry(0, EntryField::Notes("pause at the bottom".into()))
            .unwrap();

        let entry = &editor.entries()[0];
        assert_eq!(entry.target_sets, Sets::new(5).unwrap());
        assert_eq!(entry.target_reps, Reps::new(5).unwrap());
        assert_eq!(entry.target_weight, Weight::new(100.0).unwrap());
        assert_eq!(entry.rest, Time::new(180).unwrap());
        assert_eq!(entry.notes, "pause at the bottom");

        assert_eq!(
            editor.update_entry(1, EntryField::Notes(String::new())),
            Err(IndexError::OutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_toggle_superset_first_entry_is_noop() {
        let mut editor = editor(&["A", "B"]);
        let before = editor.clone();

        editor.toggle_superset(0).unwrap();

        assert_eq!(editor, before);
    }

    #[test]
    fn test_toggle_superset_out_of_range() {
        let mut editor = editor(&["A"]);

        assert_eq!(
            editor.toggle_superset(1),
            Err(IndexError::OutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_toggle_superset_joins_predecessor_with_fresh_token() {
        let mut editor = editor(&["A", "B", "C"]);

        editor.toggle_superset(1).unwrap();

        assert_eq!(superset_ids(&editor), vec![Some(1), Some(1), None]);

        editor.toggle_superset(2).unwrap();

        assert_eq!(superset_ids(&editor), vec![Some(1), Some(1), Some(1)]);
    }

    #[test]
    fn test_toggle_superset_dissolves_forward() {
        let mut editor = editor(&["A", "B", "C"]);
        editor.toggle_superset(1).unwrap();
        editor.toggle_superset(2).unwrap();

        editor.toggle_superset(1).unwrap();

        // The scan never touches entries before the toggled index.
        assert_eq!(superset_ids(&editor), vec![Some(1), None, None]);
    }

    #[test]
    fn test_toggle_superset_dissolve_stops_at_other_chain() {
        let mut editor = editor(&["A", "B", "C", "D"]);
        editor.toggle_superset(1).unwrap();
        editor.toggle_superset(3).unwrap();

        assert_eq!(superset_ids(&editor), vec![Some(1), Some(1), Some(2), Some(2)]);

        editor.toggle_superset(1).unwrap();

        assert_eq!(superset_ids(&editor), vec![Some(1), None, Some(2), Some(2)]);
    }

    #[test]
    fn test_toggle_superset_tokens_are_not_reused() {
        let mut editor = editor(&["A", "B"]);

        editor.toggle_superset(1).unwrap();
        editor.toggle_superset(1).unwrap();
        editor.toggle_superset(1).unwrap();

        assert_eq!(superset_ids(&editor), vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_reorder_moves_entry_and_clears_supersets() {
        let mut editor = editor(&["A", "B", "C"]);
        editor.toggle_superset(1).unwrap();

        editor.reorder(0, 2).unwrap();

        assert_eq!(names(&editor), vec!["B", "C", "A"]);
        assert_eq!(superset_ids(&editor), vec![None, None, None]);
    }

    #[rstest]
    #[case(3, 0)]
    #[case(0, 3)]
    fn test_reorder_out_of_range(#[case] from: usize, #[case] to: usize) {
        let mut editor = editor(&["A", "B", "C"]);
        let before = editor.clone();

        assert_eq!(
            editor.reorder(from, to),
            Err(IndexError::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(editor, before);
    }

    #[test]
    fn test_remove_entry_keeps_broken_chain_tokens() {
        let mut editor = editor(&["A", "B", "C"]);
        editor.toggle_superset(1).unwrap();
        editor.toggle_superset(2).unwrap();

        editor.remove_entry(1).unwrap();

        // Removal does not repair adjacency; the remaining ends keep the
        // token of the dissolved middle.
        assert_eq!(superset_ids(&editor), vec![Some(1), Some(1)]);
    }

    #[test]
    fn test_records_round_trip() {
        let mut editor = editor(&["A", "B", "C"]);
        editor.toggle_superset(1).unwrap();
        editor
            .update_entry(2, EntryField::TargetWeight(Weight::new(40.0).unwrap()))
            .unwrap();

        let records = editor.records();
        let rebuilt = RoutineEditor::from_entries(
            records
                .iter()
                .zip(editor.entries())
                .map(|(record, entry)| RoutineEntry::from_record(record, entry.name.clone()))
                .collect(),
        );

        assert_eq!(rebuilt.entries(), editor.entries());
    }

    #[test]
    fn test_from_entries_continues_counter_past_stored_tokens() {
        let mut entries = vec![
            RoutineEntry::new(1.into(), Name::new("A").unwrap()),
            RoutineEntry::new(2.into(), Name::new("B").unwrap()),
            RoutineEntry::new(3.into(), Name::new("C").unwrap()),
            RoutineEntry::new(4.into(), Name::new("D").unwrap()),
        ];
        entries[0].superset_id = Some(SupersetID::new(5).unwrap());
        entries[1].superset_id = Some(SupersetID::new(5).unwrap());
        let mut editor = RoutineEditor::from_entries(entries);

        editor.toggle_superset(3).unwrap();

        assert_eq!(
            superset_ids(&editor),
            vec![Some(5), Some(5), Some(6), Some(6)]
        );
    }

    #[test]
    fn test_compose_and_serialize() {
        let mut editor = RoutineEditor::new();
        editor.add_entry(1.into(), Name::new("Bench Press").unwrap());
        editor.add_entry(2.into(), Name::new("Incline Press").unwrap());
        editor.add_entry(3.into(), Name::new("Cable Fly").unwrap());

        editor.toggle_superset(1).unwrap();
        editor.toggle_superset(2).unwrap();

        let records = editor.records();

        assert_eq!(
            records.iter().map(|r| r.position).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(
            records
                .iter()
                .map(|r| r.superset_id.map(u32::from))
                .collect::<Vec<_>>(),
            vec![Some(1), Some(1), Some(1)]
        );
    }
}
