// Workout plan data model
//
// Wire names are camelCase to match the JSON the model is asked to produce
// and the blobs already sitting in a data directory.

use serde::{Deserialize, Serialize};

/// A generated workout and nutrition plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub workout_schedule: WorkoutSchedule,
    pub tips: Tips,
}

/// The `{"workoutPlan": ...}` object the model returns and the store keeps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEnvelope {
    pub workout_plan: WorkoutPlan,
}

impl From<WorkoutPlan> for PlanEnvelope {
    fn from(workout_plan: WorkoutPlan) -> Self {
        Self { workout_plan }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSchedule {
    pub workouts_per_week: u32,
    /// Minutes per session
    pub workout_duration: u32,
    pub workouts: Vec<WorkoutDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDay {
    /// Free label, not checked against a calendar
    pub day: String,
    /// The schema handed to the model calls this `exercise`
    #[serde(default, alias = "exercise")]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    pub intensity: String,
}

impl Exercise {
    /// Human-readable prescription: "3 sets × 10 reps", "20 minutes", or both
    pub fn prescription(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let (Some(sets), Some(reps)) = (self.sets, self.reps) {
            parts.push(format!("{} sets × {} reps", sets, reps));
        }
        if let Some(minutes) = self.duration {
            parts.push(format!("{} minutes", minutes));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tips {
    pub motivation: Vec<String>,
    pub diet: Vec<String>,
    pub recovery: Vec<String>,
    pub tracking_progress: Vec<String>,
    pub nutrition: Nutrition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_sports: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    pub meals_per_day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<u32>,
    pub suggested_meals: Vec<SuggestedMeal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedMeal {
    pub meal: String,
    pub description: String,
    pub calories: u32,
}

impl WorkoutPlan {
    /// Look up a training day by label, ignoring case
    pub fn day(&self, label: &str) -> Option<&WorkoutDay> {
        self.workout_schedule
            .workouts
            .iter()
            .find(|d| d.day.eq_ignore_ascii_case(label.trim()))
    }

    /// Stated daily total, or the sum of the suggested meals when absent
    pub fn daily_calories(&self) -> u64 {
        let nutrition = &self.tips.nutrition;
        match nutrition.total_calories {
            Some(total) => u64::from(total),
            None => nutrition
                .suggested_meals
                .iter()
                .map(|m| u64::from(m.calories))
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(duration: Option<u32>, sets: Option<u32>, reps: Option<u32>) -> Exercise {
        Exercise {
            name: "Squat".to_string(),
            kind: "strength".to_string(),
            duration,
            reps,
            sets,
            intensity: "moderate".to_string(),
        }
    }

    #[test]
    fn test_prescription_forms() {
        assert_eq!(
            exercise(None, Some(3), Some(10)).prescription().as_deref(),
            Some("3 sets × 10 reps")
        );
        assert_eq!(
            exercise(Some(20), None, None).prescription().as_deref(),
            Some("20 minutes")
        );
        assert_eq!(
            exercise(Some(5), Some(2), Some(8)).prescription().as_deref(),
            Some("2 sets × 8 reps, 5 minutes")
        );
        // reps without sets is not a complete prescription
        assert_eq!(exercise(None, None, Some(12)).prescription(), None);
    }

    #[test]
    fn test_day_accepts_singular_exercise_key() {
        let day: WorkoutDay = serde_json::from_str(
            r#"{"day":"Monday","exercise":[{"name":"Row","type":"cardio","duration":15,"intensity":"high"}]}"#,
        )
        .unwrap();
        assert_eq!(day.exercises.len(), 1);
        assert_eq!(day.exercises[0].kind, "cardio");

        let written = serde_json::to_value(&day).unwrap();
        assert!(written.get("exercises").is_some());
        assert!(written["exercises"][0].get("reps").is_none());
    }

    #[test]
    fn test_daily_calories_falls_back_to_meal_sum() {
        let mut plan = WorkoutPlan {
            workout_schedule: WorkoutSchedule {
                workouts_per_week: 3,
                workout_duration: 30,
                workouts: vec![WorkoutDay {
                    day: "Monday".to_string(),
                    exercises: vec![],
                }],
            },
            tips: Tips {
                motivation: vec![],
                diet: vec![],
                recovery: vec![],
                tracking_progress: vec![],
                nutrition: Nutrition {
                    meals_per_day: 2,
                    total_calories: None,
                    suggested_meals: vec![
                        SuggestedMeal {
                            meal: "Breakfast".to_string(),
                            description: "Oats".to_string(),
                            calories: 400,
                        },
                        SuggestedMeal {
                            meal: "Dinner".to_string(),
                            description: "Dal and rice".to_string(),
                            calories: 650,
                        },
                    ],
                },
                recommended_sports: None,
            },
        };
        assert_eq!(plan.daily_calories(), 1050);
        plan.tips.nutrition.total_calories = Some(2200);
        assert_eq!(plan.daily_calories(), 2200);

        // Absurd model output must not overflow the sum
        plan.tips.nutrition.total_calories = None;
        for meal in &mut plan.tips.nutrition.suggested_meals {
            meal.calories = u32::MAX;
        }
        assert_eq!(plan.daily_calories(), 2 * u64::from(u32::MAX));
        assert!(plan.day(" monday ").is_some());
        assert!(plan.day("Friday").is_none());
    }
}
