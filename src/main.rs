use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::debug;

use entrybook::{
    config::{AppConfig, load_config},
    core::store::EntryStore,
    forms::{
        FormSurface, MemoryForm, admin, admin::AdminPanel, contact, contact::ContactForm,
        registration, registration::RegistrationForm,
    },
    logging::init_tracing,
    notify::{Notification, Notifier},
    persist::KvStorage,
    types::{EntryId, NotificationKind},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", env = "ENTRYBOOK_CONFIG", global = true)]
    config: Option<String>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List stored entries
    List {
        /// Print table rows as HTML
        #[arg(long)]
        html: bool,
    },
    /// Add a contest entry
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        dept: String,
        #[arg(long)]
        title: String,
    },
    /// Edit an entry; omitted fields keep their stored value
    Edit {
        #[arg(long)]
        id: EntryId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        dept: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Delete an entry
    Delete {
        #[arg(long)]
        id: EntryId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Compose a contest registration email
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Agree to the contest rules
        #[arg(long)]
        agree: bool,
    },
    /// Compose a message to the organisers
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notification: Notification) {
        let mark = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        eprintln!("[{mark}] {}", notification.message);
    }
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt} [y/N] ");
    if io::stderr().flush().is_err() {
        return false;
    }
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}

fn report_field_errors(form: &MemoryForm) {
    let mut errors: Vec<_> = form.errors().collect();
    errors.sort();
    for (field, message) in errors {
        eprintln!("  {field}: {message}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path).with_context(|| format!("loading {path}"))?,
        None => AppConfig::default(),
    };

    let level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    init_tracing(level)?;
    debug!(?config, "configuration loaded");

    let mut notifier = TerminalNotifier;

    match cli.command {
        Commands::List { html } => {
            let mut store = open_store(&config)?;
            let view = AdminPanel::new(&mut store).table();
            if html {
                println!("{}", view.to_html());
            } else {
                print!("{}", view.to_text());
            }
        }
        Commands::Add { name, dept, title } => {
            let mut store = open_store(&config)?;
            let mut panel = AdminPanel::new(&mut store);
            let mut form = MemoryForm::new()
                .with(admin::NAME, &name)
                .with(admin::DEPARTMENT, &dept)
                .with(admin::PHOTO_TITLE, &title);
            if panel.submit(&mut form, &mut notifier).is_err() {
                report_field_errors(&form);
                bail!("entry not added");
            }
            println!("{} entries", panel.table().count);
        }
        Commands::Edit { id, name, dept, title } => {
            let mut store = open_store(&config)?;
            let mut panel = AdminPanel::new(&mut store);
            let mut form = MemoryForm::new();
            if panel.begin_edit(id, &mut form, &mut notifier).is_err() {
                bail!("entry {id} not found");
            }
            for (field, value) in [
                (admin::NAME, name),
                (admin::DEPARTMENT, dept),
                (admin::PHOTO_TITLE, title),
            ] {
                if let Some(value) = value {
                    form.set_value(field, &value);
                }
            }
            if panel.submit(&mut form, &mut notifier).is_err() {
                report_field_errors(&form);
                bail!("entry {id} not updated");
            }
        }
        Commands::Delete { id, yes } => {
            let mut store = open_store(&config)?;
            let mut panel = AdminPanel::new(&mut store);
            let mut confirm = |prompt: &str| yes || prompt_yes_no(prompt);
            panel
                .delete(id, &mut confirm, &mut notifier)
                .with_context(|| format!("deleting entry {id}"))?;
        }
        Commands::Register {
            name,
            email,
            phone,
            department,
            category,
            title,
            description,
            agree,
        } => {
            let mut form = MemoryForm::new()
                .with(registration::NAME, &name)
                .with(registration::EMAIL, &email)
                .with(registration::PHONE, &phone)
                .with(registration::DEPARTMENT, &department)
                .with(registration::CATEGORY, &category)
                .with(registration::TITLE, &title)
                .with(registration::DESCRIPTION, &description);
            form.set_checked(registration::AGREE_RULES, agree);

            let reg = RegistrationForm::new(config.contact_email.clone(), config.redirect_delay());
            let link = match reg.submit(&mut form, &mut notifier, Local::now().date_naive()) {
                Ok(link) => link,
                Err(err) => {
                    report_field_errors(&form);
                    bail!("registration not sent: {err}");
                }
            };
            reg.hand_off(&link, &mut form, &mut notifier, |uri| println!("{uri}"))
                .await;
        }
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let mut form = MemoryForm::new()
                .with(contact::NAME, &name)
                .with(contact::EMAIL, &email)
                .with(contact::SUBJECT, &subject)
                .with(contact::MESSAGE, &message);
            match ContactForm::new(config.contact_email.clone()).submit(&mut form, &mut notifier) {
                Ok(link) => println!("{link}"),
                Err(err) => {
                    report_field_errors(&form);
                    bail!("message not sent: {err}");
                }
            }
        }
    }

    Ok(())
}

fn open_store(config: &AppConfig) -> Result<EntryStore<Box<dyn KvStorage>>> {
    let storage = config
        .open_storage()
        .with_context(|| format!("opening storage {}", config.storage.path.display()))?;
    Ok(EntryStore::with_key(storage, config.storage.key.clone()))
}
