use clap::{Parser, Subcommand};

/// PrepPlanner — portion a meal prep across people by planned calorie shares.
#[derive(Parser, Debug)]
#[command(name = "prep_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the session state JSON file.
    #[arg(short, long, default_value = "meal_state.json")]
    pub file: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add people with their meal counts and per-meal calorie targets.
    Setup,

    /// Add custom foods (weight-based or unit-based).
    Foods,

    /// Create groups and assign foods to them.
    Build,

    /// Enter per-food allocations in grams, kcal or percent of target.
    Plan,

    /// Give a person an explicit share of one group.
    Allocate,

    /// Enter cooked weights and show adjusted per-person portions.
    Cook,

    /// Show people, groups and the plan overview.
    Summary,

    /// Export per-person portions to a CSV file.
    Export {
        /// Output path.
        #[arg(short, long, default_value = "portions.csv")]
        out: String,
    },

    /// Reset parts of the session.
    Reset {
        /// Remove all people (and their personal plans/allocations).
        #[arg(long)]
        people: bool,

        /// Remove all groups.
        #[arg(long)]
        groups: bool,

        /// Remove all plan entries.
        #[arg(long)]
        plans: bool,

        /// Clear the whole session.
        #[arg(long)]
        all: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Summary
    }
}
