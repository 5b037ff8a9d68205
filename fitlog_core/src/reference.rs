//! Static reference charts: exercise suggestions per category and diet
//! plans per goal.
//!
//! Both tables are built once on first use and shared read-only afterwards.

use crate::Category;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Suggested exercises for one workout category
#[derive(Clone, Debug, Serialize)]
pub struct WorkoutChartRow {
    pub category: Category,
    pub exercises: Vec<&'static str>,
}

/// A diet plan for one fitness goal
#[derive(Clone, Debug, Serialize)]
pub struct DietPlan {
    pub goal: &'static str,
    pub meals: Vec<&'static str>,
}

static WORKOUT_CHART: Lazy<Vec<WorkoutChartRow>> = Lazy::new(|| {
    vec![
        WorkoutChartRow {
            category: Category::WarmUp,
            exercises: vec![
                "5 min Jog",
                "Jumping Jacks",
                "Arm Circles",
                "Leg Swings",
                "Dynamic Stretching",
            ],
        },
        WorkoutChartRow {
            category: Category::Workout,
            exercises: vec![
                "Push-ups",
                "Squats",
                "Plank",
                "Lunges",
                "Burpees",
                "Crunches",
            ],
        },
        WorkoutChartRow {
            category: Category::CoolDown,
            exercises: vec![
                "Slow Walking",
                "Static Stretching",
                "Deep Breathing",
                "Yoga Poses",
            ],
        },
    ]
});

static DIET_CHART: Lazy<Vec<DietPlan>> = Lazy::new(|| {
    vec![
        DietPlan {
            goal: "Weight Loss",
            meals: vec![
                "Oatmeal with Fruits",
                "Grilled Chicken Salad",
                "Vegetable Soup",
                "Brown Rice & Stir-fry Veggies",
            ],
        },
        DietPlan {
            goal: "Muscle Gain",
            meals: vec![
                "Egg Omelet",
                "Chicken Breast",
                "Quinoa & Beans",
                "Protein Shake",
                "Greek Yogurt with Nuts",
            ],
        },
        DietPlan {
            goal: "Endurance",
            meals: vec![
                "Banana & Peanut Butter",
                "Whole Grain Pasta",
                "Sweet Potatoes",
                "Salmon & Avocado",
                "Trail Mix",
            ],
        },
    ]
});

/// Exercise suggestions in chart order
pub fn workout_chart() -> &'static [WorkoutChartRow] {
    &WORKOUT_CHART
}

/// Diet plans per goal
pub fn diet_chart() -> &'static [DietPlan] {
    &DIET_CHART
}

/// Check both charts for gaps
///
/// Returns a list of problems, or an empty Vec if both charts are usable.
pub fn validate() -> Vec<String> {
    let mut errors = Vec::new();

    for category in Category::ALL {
        match workout_chart().iter().find(|row| row.category == category) {
            None => errors.push(format!("Workout chart has no row for {}", category)),
            Some(row) if row.exercises.is_empty() => {
                errors.push(format!("Workout chart row {} has no exercises", category))
            }
            Some(_) => {}
        }
    }

    for plan in diet_chart() {
        if plan.goal.is_empty() {
            errors.push("Diet plan has empty goal".to_string());
        }
        if plan.meals.is_empty() {
            errors.push(format!("Diet plan '{}' has no meals", plan.goal));
        }
    }

    errors
}
