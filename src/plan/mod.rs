// Workout plans: the data model and the extractor that recovers a plan
// from free-form model output.

pub mod extractor;
pub mod types;

pub use extractor::{extract_plan, Extraction};
pub use types::{
    Exercise, Nutrition, PlanEnvelope, SuggestedMeal, Tips, WorkoutDay, WorkoutPlan,
    WorkoutSchedule,
};
