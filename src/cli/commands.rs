// Command-line surface and handlers

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use super::render;
use crate::app::AppContext;
use crate::auth::{Access, Decision, LoginForm, Redirect, SignupForm};
use crate::errors::AuthError;
use crate::logging::PlanFeedback;
use crate::providers::Preferences;

#[derive(Debug, Parser)]
#[command(name = "pulseplan", version, about = "AI workout and nutrition plans in your terminal")]
pub struct Cli {
    /// Data directory (default ~/.pulseplan)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Forget the signed-in user
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Generate a new plan from your preferences
    Generate(GenerateArgs),
    /// Show or clear saved plans
    History {
        /// Delete every saved plan
        #[arg(long)]
        clear: bool,
        /// Skip the confirmation prompt
        #[arg(long, requires = "clear")]
        yes: bool,
        /// Only show this training day
        #[arg(long)]
        day: Option<String>,
    },
    /// Rate the most recently generated plan (1-5)
    Rate {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        note: Option<String>,
    },
    /// Set the display name used for posts and comments
    Name { name: String },
    /// Community feed
    Feed {
        #[command(subcommand)]
        action: FeedCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum FeedCommand {
    /// List posts
    List,
    /// Share a post
    Post { text: String },
    /// Like or unlike a post
    Like { index: usize },
    /// Comment on a post
    Comment { index: usize, text: String },
}

/// Overrides for the configured preferences
#[derive(Debug, Default, Args)]
pub struct GenerateArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub age: Option<u32>,
    /// Weight in kg
    #[arg(long)]
    pub weight: Option<f32>,
    /// Height in cm
    #[arg(long)]
    pub height: Option<f32>,
    #[arg(long)]
    pub ailments: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    /// beginner, intermediate or advanced
    #[arg(long)]
    pub fitness_level: Option<String>,
    /// e.g. build-muscle, lose-weight, endurance
    #[arg(long)]
    pub fitness_goal: Option<String>,
    /// Dietary restriction (repeatable)
    #[arg(long = "diet")]
    pub dietary_restrictions: Vec<String>,
    /// Minutes per session
    #[arg(long)]
    pub duration: Option<u32>,
    #[arg(long)]
    pub per_week: Option<u32>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Only show this training day of the new plan
    #[arg(long)]
    pub day: Option<String>,
}

impl GenerateArgs {
    pub fn apply(&self, base: &Preferences) -> Preferences {
        let mut prefs = base.clone();
        if let Some(v) = &self.name {
            prefs.name = v.clone();
        }
        if let Some(v) = self.age {
            prefs.age = v;
        }
        if let Some(v) = self.weight {
            prefs.weight = v;
        }
        if let Some(v) = self.height {
            prefs.height = v;
        }
        if let Some(v) = &self.ailments {
            prefs.ailments = v.clone();
        }
        if let Some(v) = &self.country {
            prefs.country = v.clone();
        }
        if let Some(v) = &self.fitness_level {
            prefs.fitness_level = v.clone();
        }
        if let Some(v) = &self.fitness_goal {
            prefs.fitness_goal = v.clone();
        }
        if !self.dietary_restrictions.is_empty() {
            prefs.dietary_restrictions = self.dietary_restrictions.clone();
        }
        if let Some(v) = self.duration {
            prefs.workout_duration = v;
        }
        if let Some(v) = self.per_week {
            prefs.workouts_per_week = v;
        }
        if let Some(v) = &self.notes {
            prefs.additional_notes = v.clone();
        }
        prefs
    }
}

impl Command {
    pub fn access(&self) -> Access {
        match self {
            Command::Login { .. } | Command::Signup { .. } => Access::Public,
            _ => Access::Protected,
        }
    }
}

/// Run one command against the application context
pub async fn run(ctx: &AppContext, command: Command) -> Result<()> {
    match ctx.guard(command.access()) {
        Decision::Allow => {}
        Decision::Redirect(Redirect::Login) => {
            println!("You are not signed in. Run `pulseplan login --email <EMAIL> --password <PASSWORD>` first.");
            return Ok(());
        }
        Decision::Redirect(Redirect::Home) => {
            let who = ctx.current_user().map(|u| u.username).unwrap_or_default();
            println!("Already signed in as {}. Run `pulseplan logout` to switch accounts.", who);
            return Ok(());
        }
    }

    match command {
        Command::Login { email, password } => {
            let user = ctx.login(&LoginForm { email, password }).await;
            report_auth(user.map(|u| u.username))
        }
        Command::Signup {
            username,
            email,
            password,
            confirm_password,
        } => {
            let form = SignupForm {
                username,
                email,
                password,
                confirm_password,
            };
            report_auth(ctx.signup(&form).await.map(|u| u.username))
        }
        Command::Logout => {
            ctx.logout().context("Failed to sign out")?;
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami => {
            if let Some(user) = ctx.current_user() {
                println!("{} <{}>", user.username, user.email);
            }
            Ok(())
        }
        Command::Generate(args) => generate(ctx, &args).await,
        Command::History { clear, yes, day } => history(ctx, clear, yes, day.as_deref()),
        Command::Rate { rating, note } => rate(ctx, rating, note.unwrap_or_default()),
        Command::Name { name } => {
            if ctx.identity().set(&name).context("Failed to save display name")? {
                println!("Display name set to {}.", name.trim());
            } else {
                println!("Display name cannot be blank.");
            }
            Ok(())
        }
        Command::Feed { action } => feed(ctx, action),
    }
}

fn report_auth(result: Result<String, AuthError>) -> Result<()> {
    match result {
        Ok(username) => {
            println!("{} Signed in as {}.", "✓".green(), username);
            Ok(())
        }
        Err(AuthError::Store(e)) => Err(e).context("Failed to save session"),
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            Ok(())
        }
    }
}

async fn generate(ctx: &AppContext, args: &GenerateArgs) -> Result<()> {
    let prefs = args.apply(&ctx.config().preferences);
    let service = ctx.plan_service()?;

    eprintln!(
        "{} Creating your workout plan. Please wait...",
        "▸".cyan().bold()
    );

    match service.generate(&prefs).await {
        Ok(generated) => {
            print!("{}", render::plan(&generated.plan, args.day.as_deref()));
            if let Some(commentary) = &generated.commentary {
                println!("{}", commentary.as_str().dark_grey());
            }
            println!(
                "{} Saved as plan {} in your history.",
                "✓".green(),
                generated.position
            );
            Ok(())
        }
        Err(e) => {
            // Nothing was saved; the previous plan stays current
            eprintln!("{} {}", "✗".red().bold(), e);
            Ok(())
        }
    }
}

fn history(ctx: &AppContext, clear: bool, yes: bool, day: Option<&str>) -> Result<()> {
    if clear {
        if !yes && !confirm("Are you sure you want to clear the history?")? {
            println!("History kept.");
            return Ok(());
        }
        ctx.plans().clear().context("Failed to clear history")?;
        println!("History cleared.");
        return Ok(());
    }

    let plans = ctx.plans().load_all_or_empty();
    match day {
        Some(day) => plans
            .iter()
            .enumerate()
            .for_each(|(i, p)| print!("Plan {}\n{}", i + 1, render::plan(p, Some(day)))),
        None => print!("{}", render::history(&plans)),
    }
    Ok(())
}

fn rate(ctx: &AppContext, rating: u8, note: String) -> Result<()> {
    let logger = ctx.generation_logger()?;
    let Some(id) = logger.last_saved_id()? else {
        println!("No generated plan to rate yet.");
        return Ok(());
    };
    logger.add_feedback(&id, PlanFeedback::new(rating, note)?)?;
    println!("Thanks for the feedback!");
    Ok(())
}

fn feed(ctx: &AppContext, action: FeedCommand) -> Result<()> {
    let mut store = match ctx.open_feed() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            return Ok(());
        }
    };

    let needs_name = matches!(action, FeedCommand::Post { .. } | FeedCommand::Comment { .. });
    let sender = ctx.identity().get()?;
    if needs_name && sender.is_none() {
        println!("Set a display name first: `pulseplan name <NAME>`.");
        return Ok(());
    }
    let sender = sender.unwrap_or_default();

    let outcome = match action {
        FeedCommand::List => Ok(()),
        FeedCommand::Post { text } => store.add_post(&text, &sender).map(|posted| {
            if !posted {
                println!("Nothing to post.");
            }
        }),
        FeedCommand::Like { index } => store.toggle_like(index).map(|_| ()),
        FeedCommand::Comment { index, text } => {
            store.add_comment(index, &text, &sender).map(|commented| {
                if !commented {
                    println!("Nothing to comment.");
                }
            })
        }
    };

    if let Err(e) = outcome {
        eprintln!("{} {}", "✗".red().bold(), e);
    }
    print!("{}", render::feed(store.posts()));
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
