// Generation request types and prompt rendering

use serde::{Deserialize, Serialize};

/// The user's profile, sent as the generation request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub name: String,
    pub age: u32,
    /// Kilograms
    pub weight: f32,
    /// Centimetres
    pub height: f32,
    pub ailments: String,
    pub country: String,
    pub fitness_level: String,
    pub fitness_goal: String,
    pub dietary_restrictions: Vec<String>,
    /// Minutes per session
    pub workout_duration: u32,
    pub workouts_per_week: u32,
    pub additional_notes: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            age: 25,
            weight: 70.0,
            height: 180.0,
            ailments: String::new(),
            country: "India".to_string(),
            fitness_level: "intermediate".to_string(),
            fitness_goal: "build-muscle".to_string(),
            dietary_restrictions: vec!["vegetarian".to_string()],
            workout_duration: 45,
            workouts_per_week: 4,
            additional_notes: String::new(),
        }
    }
}

impl Preferences {
    /// Render the user prompt for the model
    pub fn to_prompt(&self) -> String {
        let ailments = if self.ailments.trim().is_empty() {
            "no ailments".to_string()
        } else {
            self.ailments.trim().to_string()
        };
        let restrictions = if self.dietary_restrictions.is_empty() {
            "none".to_string()
        } else {
            self.dietary_restrictions.join(", ")
        };

        let mut prompt = format!(
            "I am {name}, a {age}-year-old {level} person from {country}.\n\
             I weigh {weight} kg and stand {height} cm tall.\n\
             I have {ailments}.\n\
             My fitness goal is {goal}.\n\
             I work out {per_week} times a week for {duration} minutes per session.\n\
             I have the following dietary restrictions: {restrictions}.\n",
            name = self.name,
            age = self.age,
            level = self.fitness_level,
            country = self.country,
            weight = self.weight,
            height = self.height,
            ailments = ailments,
            goal = self.fitness_goal,
            per_week = self.workouts_per_week,
            duration = self.workout_duration,
            restrictions = restrictions,
        );

        if !self.additional_notes.trim().is_empty() {
            prompt.push_str(self.additional_notes.trim());
            prompt.push('\n');
        }

        prompt.push_str(
            "Can you suggest a workout plan, motivational tips, specific nutritional advice \
             such as meal recommendations, total calorie counts, and recommended sports?",
        );
        prompt
    }
}

/// System instruction describing the JSON the extractor expects back
pub const PLAN_SYSTEM_INSTRUCTION: &str = r#"You are a fitness coach. The user describes themselves (name, age, weight, height, ailments, country, fitness level, fitness goal, dietary restrictions, workout duration, workouts per week, additional notes).

Suggest a personalized workout plan with motivational tips, specific nutritional advice including meal recommendations and total calories, and recommended sports.

Answer with one JSON object following this schema:
{
  "workoutPlan": {
    "workoutSchedule": {
      "workoutsPerWeek": "integer",
      "workoutDuration": "integer",
      "workouts": [
        {
          "day": "string",
          "exercises": [
            {
              "name": "string",
              "type": "string",
              "duration": "integer",
              "reps": "integer",
              "sets": "integer",
              "intensity": "string"
            }
          ]
        }
      ]
    },
    "tips": {
      "motivation": ["string"],
      "diet": ["string"],
      "recovery": ["string"],
      "trackingProgress": ["string"],
      "nutrition": {
        "mealsPerDay": "integer",
        "totalCalories": "integer",
        "suggestedMeals": [
          { "meal": "string", "description": "string", "calories": "integer" }
        ]
      },
      "recommendedSports": ["string"]
    }
  }
}"#;
