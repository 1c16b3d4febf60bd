// Plain-text rendering for plans, history and the feed

use crossterm::style::Stylize;
use std::fmt::Write;

use crate::plan::{WorkoutDay, WorkoutPlan};
use crate::storage::Post;

/// Render one plan. With `day`, only that training day is shown.
pub fn plan(plan: &WorkoutPlan, day: Option<&str>) -> String {
    let mut out = String::new();
    let schedule = &plan.workout_schedule;

    let _ = writeln!(out, "{}", "Workout Schedule".bold());
    let _ = writeln!(out, "  Workouts per week: {}", schedule.workouts_per_week);
    let _ = writeln!(out, "  Workout duration: {} minutes", schedule.workout_duration);
    let _ = writeln!(out);

    match day {
        Some(label) => match plan.day(label) {
            Some(d) => render_day(&mut out, d),
            None => {
                let _ = writeln!(out, "  No workout scheduled for {}", label);
            }
        },
        None if schedule.workouts.is_empty() => {
            let _ = writeln!(out, "  No workouts in this plan");
        }
        None => schedule.workouts.iter().for_each(|d| render_day(&mut out, d)),
    }

    let tips = &plan.tips;
    tip_section(&mut out, "Motivation", &tips.motivation);
    tip_section(&mut out, "Diet", &tips.diet);
    tip_section(&mut out, "Recovery", &tips.recovery);
    tip_section(&mut out, "Tracking Progress", &tips.tracking_progress);
    if let Some(sports) = &tips.recommended_sports {
        tip_section(&mut out, "Recommended Sports", sports);
    }

    let nutrition = &tips.nutrition;
    let _ = writeln!(out, "{}", "Nutrition".bold());
    let _ = writeln!(out, "  Meals per day: {}", nutrition.meals_per_day);
    if nutrition.total_calories.is_some() {
        let _ = writeln!(out, "  Total calories: {}", plan.daily_calories());
    } else if !nutrition.suggested_meals.is_empty() {
        let _ = writeln!(out, "  Total calories: {} (sum of suggested meals)", plan.daily_calories());
    }
    for meal in &nutrition.suggested_meals {
        let _ = writeln!(
            out,
            "  {}: {} ({} kcal)",
            meal.meal, meal.description, meal.calories
        );
    }

    out
}

fn render_day(out: &mut String, day: &WorkoutDay) {
    let _ = writeln!(out, "{}", day.day.as_str().cyan().bold());
    if day.exercises.is_empty() {
        let _ = writeln!(out, "  Rest day");
    }
    for exercise in &day.exercises {
        let mut line = format!("  • {} ({})", exercise.name, exercise.kind);
        if let Some(prescription) = exercise.prescription() {
            let _ = write!(line, " - {}", prescription);
        }
        let _ = write!(line, ", {} intensity", exercise.intensity);
        let _ = writeln!(out, "{}", line);
    }
    let _ = writeln!(out);
}

fn tip_section(out: &mut String, title: &str, tips: &[String]) {
    if tips.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}", title.bold());
    for tip in tips {
        let _ = writeln!(out, "  - {}", tip);
    }
    let _ = writeln!(out);
}

/// Render the whole plan history, oldest first
pub fn history(plans: &[WorkoutPlan]) -> String {
    if plans.is_empty() {
        return "No workout plans found.\n".to_string();
    }

    let mut out = String::new();
    for (i, p) in plans.iter().enumerate() {
        let _ = writeln!(out, "{}", format!("Plan {} of {}", i + 1, plans.len()).green().bold());
        out.push_str(&plan(p, None));
        if i + 1 < plans.len() {
            let _ = writeln!(out, "{}", "─".repeat(60).dark_grey());
        }
    }
    out
}

/// Render the feed with indexes usable by `feed like` / `feed comment`
pub fn feed(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "No posts yet. Be the first to share!\n".to_string();
    }

    let mut out = String::new();
    for (i, post) in posts.iter().enumerate() {
        let heart = if post.liked { "♥" } else { "♡" };
        let _ = writeln!(
            out,
            "[{}] {}: {}  {} {}",
            i,
            post.sender.as_str().bold(),
            post.text,
            heart,
            post.likes
        );
        for comment in &post.comments {
            let _ = writeln!(out, "      ↳ {}: {}", comment.sender, comment.text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::extract_plan;
    use crate::storage::Comment;

    const RAW: &str = r#"{"workoutPlan":{"workoutSchedule":{"workoutsPerWeek":2,"workoutDuration":40,"workouts":[{"day":"Monday","exercise":[{"name":"Push-ups","type":"strength","sets":3,"reps":12,"intensity":"moderate"}]},{"day":"Thursday","exercises":[{"name":"Jog","type":"cardio","duration":25,"intensity":"low"}]}]},"tips":{"motivation":["Show up"],"diet":[],"recovery":["Sleep 8h"],"trackingProgress":[],"nutrition":{"mealsPerDay":3,"totalCalories":2100,"suggestedMeals":[{"meal":"Lunch","description":"Paneer wrap","calories":650}]},"recommendedSports":["Badminton"]}}}"#;

    #[test]
    fn test_plan_rendering() {
        let extraction = extract_plan(RAW).unwrap();
        let text = plan(&extraction.plan, None);
        assert!(text.contains("Workouts per week: 2"));
        assert!(text.contains("Push-ups (strength) - 3 sets × 12 reps, moderate intensity"));
        assert!(text.contains("Jog (cardio) - 25 minutes, low intensity"));
        assert!(text.contains("  - Sleep 8h"));
        assert!(text.contains("  - Badminton"));
        assert!(text.contains("Total calories: 2100"));
        assert!(text.contains("Lunch: Paneer wrap (650 kcal)"));
        assert!(!text.contains("Tracking Progress"));
    }

    #[test]
    fn test_total_falls_back_to_meal_sum() {
        let mut extraction = extract_plan(RAW).unwrap();
        extraction.plan.tips.nutrition.total_calories = None;
        let text = plan(&extraction.plan, None);
        assert!(text.contains("Total calories: 650 (sum of suggested meals)"));

        extraction.plan.tips.nutrition.suggested_meals.clear();
        assert!(!plan(&extraction.plan, None).contains("Total calories"));
    }

    #[test]
    fn test_single_day() {
        let extraction = extract_plan(RAW).unwrap();
        let text = plan(&extraction.plan, Some("thursday"));
        assert!(text.contains("Jog"));
        assert!(!text.contains("Push-ups"));

        let text = plan(&extraction.plan, Some("Sunday"));
        assert!(text.contains("No workout scheduled for Sunday"));
    }

    #[test]
    fn test_empty_history_and_feed() {
        assert_eq!(history(&[]), "No workout plans found.\n");
        assert!(feed(&[]).contains("No posts yet"));
    }

    #[test]
    fn test_feed_rendering() {
        let posts = vec![Post {
            text: "Ran 5k".to_string(),
            sender: "Alice".to_string(),
            likes: 1,
            liked: true,
            comments: vec![Comment {
                text: "Nice pace".to_string(),
                sender: "Bob".to_string(),
            }],
        }];
        let text = feed(&posts);
        assert!(text.starts_with("[0] "));
        assert!(text.contains("Ran 5k  ♥ 1"));
        assert!(text.contains("↳ Bob: Nice pace"));
    }
}
