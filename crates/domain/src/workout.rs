use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, Exercise, ExerciseID, IndexError, Name, ReadError, Reps, Routine,
    RoutineID, SupersetID, Weight,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

/// A performed (or in-progress) training session, logged against a
/// routine.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub routine_id: RoutineID,
    pub name: Name,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub entries: Vec<WorkoutEntry>,
}

impl Workout {
    /// Prefills a workout from a routine. Every entry starts with its
    /// target number of sets, each set prefilled with the target reps
    /// and weight and marked as not completed. Entries referencing an
    /// exercise missing from the catalog are skipped.
    #[must_use]
    pub fn from_routine(
        routine: &Routine,
        exercises: &BTreeMap<ExerciseID, Exercise>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: WorkoutID::new(),
            routine_id: routine.id,
            name: routine.name.clone(),
            started_at,
            completed_at: started_at,
            entries: routine
                .entries
                .iter()
                .filter_map(|record| {
                    exercises
                        .get(&record.exercise_id)
                        .map(|exercise| WorkoutEntry {
                            exercise_id: record.exercise_id,
                            name: exercise.name.clone(),
                            sets: (1..=u32::from(record.target_sets))
                                .map(|set_number| WorkoutSet {
                                    set_number,
                                    reps: record.target_reps,
                                    weight: record.target_weight,
                                    completed: false,
                                })
                                .collect(),
                            notes: record.notes.clone(),
                            superset_id: record.superset_id,
                        })
                })
                .collect(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.completed_at - self.started_at
    }

    /// Duration rounded up to full minutes, as stored in the log table.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.duration().num_seconds() + 59) / 60
    }

    #[must_use]
    pub fn num_completed_sets(&self) -> usize {
        self.entries.iter().map(|e| e.completed_sets().len()).sum()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// One exercise within a logged workout, with its recorded sets.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    pub exercise_id: ExerciseID,
    pub name: Name,
    pub sets: Vec<WorkoutSet>,
    pub notes: String,
    pub superset_id: Option<SupersetID>,
}

impl WorkoutEntry {
    /// Appends a set, copying reps and weight from the last one.
    pub fn add_set(&mut self) {
        let (reps, weight) = self
            .sets
            .last()
            .map_or((Reps::DEFAULT, Weight::default()), |s| (s.reps, s.weight));
        #[allow(clippy::cast_possible_truncation)]
        let set_number = self.sets.len() as u32 + 1;
        self.sets.push(WorkoutSet {
            set_number,
            reps,
            weight,
            completed: false,
        });
    }

    /// Deletes the set at `index` and renumbers the remaining sets.
    pub fn remove_set(&mut self, index: usize) -> Result<WorkoutSet, IndexError> {
        let len = self.sets.len();
        if index >= len {
            return Err(IndexError::OutOfRange { index, len });
        }
        let removed = self.sets.remove(index);
        for (i, set) in self.sets.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            {
                set.set_number = i as u32 + 1;
            }
        }
        Ok(removed)
    }

    pub fn toggle_completed(&mut self, index: usize) -> Result<(), IndexError> {
        let len = self.sets.len();
        if index >= len {
            return Err(IndexError::OutOfRange { index, len });
        }
        self.sets[index].completed = !self.sets[index].completed;
        Ok(())
    }

    /// Only completed sets are persisted on save.
    #[must_use]
    pub fn completed_sets(&self) -> Vec<&WorkoutSet> {
        self.sets.iter().filter(|s| s.completed).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutSet {
    pub set_number: u32,
    pub reps: Reps,
    pub weight: Weight,
    pub completed: bool,
}

/// Renders an elapsed duration as `h:mm:ss`, omitting the hours while
/// they are zero.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.num_seconds().max(0);
    let hours = seconds / 3600;
    let minutes = seconds % 3600 / 60;
    let seconds = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Category, RoutineEntryRecord, Sets, Time};

    use super::*;

    fn routine() -> Routine {
        Routine {
            id: 1.into(),
            name: Name::new("Push Day A").unwrap(),
            description: String::new(),
            category: Category::Push,
            entries: vec![
                RoutineEntryRecord {
                    exercise_id: 1.into(),
                    position: 0,
                    target_sets: Sets::new(2).unwrap(),
                    target_reps: Reps::new(8).unwrap(),
                    target_weight: Weight::new(60.0).unwrap(),
                    rest: Time::new(90).unwrap(),
                    notes: String::from("slow eccentric"),
                    superset_id: Some(1.into()),
                },
                RoutineEntryRecord {
                    exercise_id: 2.into(),
                    position: 1,
                    target_sets: Sets::new(3).unwrap(),
                    target_reps: Reps::new(12).unwrap(),
                    target_weight: Weight::default(),
                    rest: Time::new(60).unwrap(),
                    notes: String::new(),
                    superset_id: Some(1.into()),
                },
            ],
        }
    }

    fn exercises() -> BTreeMap<ExerciseID, Exercise> {
        BTreeMap::from([
            (
                1.into(),
                Exercise {
                    id: 1.into(),
                    name: Name::new("Bench Press").unwrap(),
                    muscle_group: None,
                    equipment: None,
                    description: String::new(),
                    custom: false,
                },
            ),
            (
                2.into(),
                Exercise {
                    id: 2.into(),
                    name: Name::new("Cable Fly").unwrap(),
                    muscle_group: None,
                    equipment: None,
                    description: String::new(),
                    custom: false,
                },
            ),
        ])
    }

    fn started_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 4, 17, 0, 0).unwrap()
    }

    #[test]
    fn test_workout_from_routine() {
        let workout = Workout::from_routine(&routine(), &exercises(), started_at());

        assert_eq!(workout.routine_id, 1.into());
        assert_eq!(workout.entries.len(), 2);
        assert_eq!(workout.entries[0].name, Name::new("Bench Press").unwrap());
        assert_eq!(workout.entries[0].sets.len(), 2);
        assert_eq!(
            workout.entries[0].sets[1],
            WorkoutSet {
                set_number: 2,
                reps: Reps::new(8).unwrap(),
                weight: Weight::new(60.0).unwrap(),
                completed: false,
            }
        );
        assert_eq!(workout.entries[0].superset_id, Some(1.into()));
        assert_eq!(workout.num_completed_sets(), 0);
    }

    #[test]
    fn test_workout_from_routine_skips_unknown_exercises() {
        let workout = Workout::from_routine(&routine(), &BTreeMap::new(), started_at());

        assert!(workout.entries.is_empty());
    }

    #[test]
    fn test_add_set_copies_last() {
        let mut workout = Workout::from_routine(&routine(), &exercises(), started_at());
        let entry = &mut workout.entries[0];

        entry.add_set();

        assert_eq!(
            entry.sets[2],
            WorkoutSet {
                set_number: 3,
                reps: Reps::new(8).unwrap(),
                weight: Weight::new(60.0).unwrap(),
                completed: false,
            }
        );
    }

    #[test]
    fn test_add_set_to_empty_entry_uses_defaults() {
        let mut entry = WorkoutEntry {
            exercise_id: 1.into(),
            name: Name::new("Bench Press").unwrap(),
            sets: vec![],
            notes: String::new(),
            superset_id: None,
        };

        entry.add_set();

        assert_eq!(
            entry.sets,
            vec![WorkoutSet {
                set_number: 1,
                reps: Reps::DEFAULT,
                weight: Weight::default(),
                completed: false,
            }]
        );
    }

    #[test]
    fn test_remove_set_renumbers() {
        let mut workout = Workout::from_routine(&routine(), &exercises(), started_at());
        let entry = &mut workout.entries[1];

        entry.remove_set(0).unwrap();

        assert_eq!(
            entry.sets.iter().map(|s| s.set_number).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(
            entry.remove_set(2),
            Err(IndexError::OutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_toggle_completed() {
        let mut workout = Workout::from_routine(&routine(), &exercises(), started_at());
        let entry = &mut workout.entries[0];

        entry.toggle_completed(0).unwrap();

        assert!(entry.sets[0].completed);
        assert_eq!(entry.completed_sets().len(), 1);

        entry.toggle_completed(0).unwrap();

        assert!(entry.completed_sets().is_empty());
        assert_eq!(
            entry.toggle_completed(5),
            Err(IndexError::OutOfRange { index: 5, len: 2 })
        );
    }

    #[rstest]
    #[case(0, 0)]
    #[case(59, 1)]
    #[case(60, 1)]
    #[case(61, 2)]
    #[case(3600, 60)]
    fn test_workout_duration_minutes(#[case] seconds: i64, #[case] expected: i64) {
        let workout = Workout {
            id: 1.into(),
            routine_id: 1.into(),
            name: Name::new("A").unwrap(),
            started_at: started_at(),
            completed_at: started_at() + Duration::seconds(seconds),
            entries: vec![],
        };
        assert_eq!(workout.duration(), Duration::seconds(seconds));
        assert_eq!(workout.duration_minutes(), expected);
    }

    #[rstest]
    #[case(0, "00:00")]
    #[case(59, "00:59")]
    #[case(61, "01:01")]
    #[case(3599, "59:59")]
    #[case(3600, "1:00:00")]
    #[case(3723, "1:02:03")]
    fn test_format_duration(#[case] seconds: i64, #[case] expected: &str) {
        assert_eq!(format_duration(Duration::seconds(seconds)), expected);
    }

    #[test]
    fn test_workout_id_nil() {
        assert!(WorkoutID::nil().is_nil());
        assert_eq!(WorkoutID::nil(), WorkoutID::default());
        assert!(!WorkoutID::new().is_nil());
    }
}
