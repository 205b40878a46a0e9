use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use ironlog_domain as domain;
use uuid::Uuid;

pub fn user() -> domain::User {
    domain::User {
        id: 1.into(),
        name: domain::Name::new("Alice").unwrap(),
        role: domain::Role::Coach,
    }
}

pub fn exercises() -> Vec<domain::Exercise> {
    vec![
        domain::Exercise {
            id: 1.into(),
            name: domain::Name::new("Bench Press").unwrap(),
            muscle_group: Some(domain::MuscleGroup::Chest),
            equipment: Some(domain::Equipment::Barbell),
            description: String::from("Flat barbell press"),
            custom: false,
        },
        domain::Exercise {
            id: 2.into(),
            name: domain::Name::new("Cable Fly").unwrap(),
            muscle_group: Some(domain::MuscleGroup::Chest),
            equipment: Some(domain::Equipment::Cable),
            description: String::new(),
            custom: false,
        },
        domain::Exercise {
            id: 3.into(),
            name: domain::Name::new("Squat").unwrap(),
            muscle_group: Some(domain::MuscleGroup::Legs),
            equipment: Some(domain::Equipment::Barbell),
            description: String::new(),
            custom: true,
        },
    ]
}

pub fn exercise_names() -> BTreeMap<Uuid, domain::Name> {
    exercises()
        .into_iter()
        .map(|e| (*e.id, e.name))
        .collect()
}

pub fn exercise_map() -> BTreeMap<domain::ExerciseID, domain::Exercise> {
    exercises().into_iter().map(|e| (e.id, e)).collect()
}

/// A push routine with its two entries grouped into one superset,
/// composed through the editor like the routine form would.
pub fn routine() -> domain::Routine {
    let mut editor = domain::RoutineEditor::new();
    editor.add_entry(1.into(), domain::Name::new("Bench Press").unwrap());
    editor.add_entry(2.into(), domain::Name::new("Cable Fly").unwrap());
    editor
        .update_entry(
            0,
            domain::EntryField::TargetWeight(domain::Weight::new(60.0).unwrap()),
        )
        .unwrap();
    editor.toggle_superset(1).unwrap();

    domain::Routine {
        id: 10.into(),
        name: domain::Name::new("Push Day A").unwrap(),
        description: String::from("Chest focus"),
        category: domain::Category::Push,
        entries: editor.records(),
    }
}

pub fn started_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 4, 17, 0, 0).unwrap()
}

/// A workout prefilled from [`routine`] with the first set of the first
/// entry completed.
pub fn workout() -> domain::Workout {
    let mut workout = domain::Workout::from_routine(&routine(), &exercise_map(), started_at());
    workout.id = 20.into();
    workout.completed_at = started_at() + Duration::minutes(45);
    workout.entries[0].toggle_completed(0).unwrap();
    workout
}
