use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ironlog_domain as domain;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row models mirroring the persisted tables. Optional text columns are
/// stored as `NULL` instead of empty strings, and enum-like columns hold
/// their lower-case keys.

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

impl From<&domain::User> for ProfileRow {
    fn from(user: &domain::User) -> Self {
        Self {
            id: *user.id,
            name: user.name.to_string(),
            role: user.role.key().to_string(),
        }
    }
}

impl TryFrom<&ProfileRow> for domain::User {
    type Error = RecordError;

    fn try_from(row: &ProfileRow) -> Result<Self, Self::Error> {
        Ok(domain::User {
            id: row.id.into(),
            name: domain::Name::new(&row.name)?,
            role: domain::Role::try_from(row.role.as_str())?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseRow {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: Option<String>,
    pub equipment: Option<String>,
    pub description: Option<String>,
    pub is_custom: bool,
}

impl From<&domain::Exercise> for ExerciseRow {
    fn from(exercise: &domain::Exercise) -> Self {
        Self {
            id: *exercise.id,
            name: exercise.name.to_string(),
            muscle_group: exercise.muscle_group.map(|m| m.key().to_string()),
            equipment: exercise.equipment.map(|e| e.key().to_string()),
            description: if exercise.description.is_empty() {
                None
            } else {
                Some(exercise.description.clone())
            },
            is_custom: exercise.custom,
        }
    }
}

impl TryFrom<&ExerciseRow> for domain::Exercise {
    type Error = RecordError;

    fn try_from(row: &ExerciseRow) -> Result<Self, Self::Error> {
        Ok(domain::Exercise {
            id: row.id.into(),
            name: domain::Name::new(&row.name)?,
            muscle_group: row
                .muscle_group
                .as_deref()
                .map(domain::MuscleGroup::try_from)
                .transpose()?,
            equipment: row
                .equipment
                .as_deref()
                .map(domain::Equipment::try_from)
                .transpose()?,
            description: row.description.clone().unwrap_or_default(),
            custom: row.is_custom,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoutineRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub exercises: Vec<RoutineExerciseRow>,
}

impl From<&domain::Routine> for RoutineRow {
    fn from(routine: &domain::Routine) -> Self {
        Self {
            id: *routine.id,
            name: routine.name.to_string(),
            description: if routine.description.is_empty() {
                None
            } else {
                Some(routine.description.clone())
            },
            category: routine.category.key().to_string(),
            exercises: routine.entries.iter().map(RoutineExerciseRow::from).collect(),
        }
    }
}

impl TryFrom<&RoutineRow> for domain::Routine {
    type Error = RecordError;

    fn try_from(row: &RoutineRow) -> Result<Self, Self::Error> {
        let mut exercises = row.exercises.clone();
        exercises.sort_by_key(|e| e.order_index);
        Ok(domain::Routine {
            id: row.id.into(),
            name: domain::Name::new(&row.name)?,
            description: row.description.clone().unwrap_or_default(),
            category: domain::Category::try_from(row.category.as_str())?,
            entries: exercises
                .iter()
                .map(domain::RoutineEntryRecord::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoutineExerciseRow {
    pub exercise_id: Uuid,
    pub order_index: u32,
    pub target_sets: u32,
    pub target_reps: u32,
    pub target_weight: f32,
    pub rest_seconds: u32,
    pub notes: Option<String>,
    pub superset_id: Option<u32>,
}

impl From<&domain::RoutineEntryRecord> for RoutineExerciseRow {
    fn from(record: &domain::RoutineEntryRecord) -> Self {
        Self {
            exercise_id: *record.exercise_id,
            order_index: record.position,
            target_sets: record.target_sets.into(),
            target_reps: record.target_reps.into(),
            target_weight: record.target_weight.into(),
            rest_seconds: record.rest.into(),
            notes: if record.notes.is_empty() {
                None
            } else {
                Some(record.notes.clone())
            },
            superset_id: record.superset_id.map(u32::from),
        }
    }
}

impl TryFrom<&RoutineExerciseRow> for domain::RoutineEntryRecord {
    type Error = RecordError;

    fn try_from(row: &RoutineExerciseRow) -> Result<Self, Self::Error> {
        Ok(domain::RoutineEntryRecord {
            exercise_id: row.exercise_id.into(),
            position: row.order_index,
            target_sets: domain::Sets::new(row.target_sets)?,
            target_reps: domain::Reps::new(row.target_reps)?,
            target_weight: domain::Weight::new(row.target_weight)?,
            rest: domain::Time::new(row.rest_seconds)?,
            notes: row.notes.clone().unwrap_or_default(),
            superset_id: row.superset_id.map(domain::SupersetID::new).transpose()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutLogRow {
    pub id: Uuid,
    pub routine_id: Uuid,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_minutes: i64,
    pub exercises: Vec<WorkoutExerciseRow>,
}

impl WorkoutLogRow {
    /// Only completed sets are persisted; entries without any completed
    /// set still get a row so their notes survive.
    #[must_use]
    pub fn from_workout(workout: &domain::Workout) -> Self {
        Self {
            id: *workout.id,
            routine_id: *workout.routine_id,
            name: workout.name.to_string(),
            started_at: workout.started_at,
            completed_at: workout.completed_at,
            duration_minutes: workout.duration_minutes(),
            exercises: workout
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| WorkoutExerciseRow {
                    exercise_id: *entry.exercise_id,
                    #[allow(clippy::cast_possible_truncation)]
                    order_index: i as u32,
                    notes: if entry.notes.is_empty() {
                        None
                    } else {
                        Some(entry.notes.clone())
                    },
                    superset_id: entry.superset_id.map(u32::from),
                    sets: entry
                        .completed_sets()
                        .iter()
                        .map(|set| WorkoutSetRow {
                            set_number: set.set_number,
                            reps: set.reps.into(),
                            weight: set.weight.into(),
                            completed: true,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Rebuilds the domain workout, resolving display names from the
    /// exercise table. Entries referencing a missing exercise are
    /// skipped, as on prefill.
    pub fn to_workout(
        &self,
        exercise_names: &BTreeMap<Uuid, domain::Name>,
    ) -> Result<domain::Workout, RecordError> {
        let mut exercises = self.exercises.clone();
        exercises.sort_by_key(|e| e.order_index);
        Ok(domain::Workout {
            id: self.id.into(),
            routine_id: self.routine_id.into(),
            name: domain::Name::new(&self.name)?,
            started_at: self.started_at,
            completed_at: self.completed_at,
            entries: exercises
                .iter()
                .filter_map(|row| {
                    exercise_names
                        .get(&row.exercise_id)
                        .map(|name| row.to_entry(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutExerciseRow {
    pub exercise_id: Uuid,
    pub order_index: u32,
    pub notes: Option<String>,
    pub superset_id: Option<u32>,
    pub sets: Vec<WorkoutSetRow>,
}

impl WorkoutExerciseRow {
    fn to_entry(&self, name: domain::Name) -> Result<domain::WorkoutEntry, RecordError> {
        Ok(domain::WorkoutEntry {
            exercise_id: self.exercise_id.into(),
            name,
            sets: self
                .sets
                .iter()
                .map(|row| {
                    Ok(domain::WorkoutSet {
                        set_number: row.set_number,
                        reps: domain::Reps::new(row.reps)?,
                        weight: domain::Weight::new(row.weight)?,
                        completed: row.completed,
                    })
                })
                .collect::<Result<Vec<_>, RecordError>>()?,
            notes: self.notes.clone().unwrap_or_default(),
            superset_id: self.superset_id.map(domain::SupersetID::new).transpose()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct WorkoutSetRow {
    pub set_number: u32,
    pub reps: u32,
    pub weight: f32,
    pub completed: bool,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RecordError {
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    Role(#[from] domain::RoleError),
    #[error(transparent)]
    MuscleGroup(#[from] domain::MuscleGroupError),
    #[error(transparent)]
    Equipment(#[from] domain::EquipmentError),
    #[error(transparent)]
    Category(#[from] domain::CategoryError),
    #[error(transparent)]
    Sets(#[from] domain::SetsError),
    #[error(transparent)]
    Reps(#[from] domain::RepsError),
    #[error(transparent)]
    Weight(#[from] domain::WeightError),
    #[error(transparent)]
    Time(#[from] domain::TimeError),
    #[error(transparent)]
    SupersetID(#[from] domain::SupersetIDError),
}
