// Build a schema by name, bind the command line fields and validate against the store

use anyhow::{anyhow, bail, Context, Result};
use blog_forms::{forms, Choice, Config, FileUpload, FormData, FormSchema, Identity, MemoryStore, Outcome, RecordStore, SqlStore};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Clone, Copy, ValueEnum)]
pub enum FormName {
    Registration,
    AddUser,
    EditUser,
    Login,
    UpdateAccount,
    RequestReset,
    ResetPassword,
    Role,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Form to validate
    form: FormName,

    /// Submitted value as name=value (repeatable)
    #[arg(short, long = "field", value_name = "NAME=VALUE")]
    fields: Vec<String>,

    /// Uploaded file as name=path (repeatable)
    #[arg(long = "file", value_name = "NAME=PATH")]
    files: Vec<String>,

    /// Id of the signed-in user (update-account)
    #[arg(long)]
    current_user: Option<i64>,

    /// Login name of the user being edited (edit-user)
    #[arg(long)]
    login_name: Option<String>,

    /// Selectable role as id:name (add-user, edit-user; repeatable)
    #[arg(long = "role", value_name = "ID:NAME")]
    roles: Vec<String>,

    /// Validate against an empty in-memory store instead of the database
    #[arg(long)]
    memory: bool,
}

pub async fn execute(config: &Config, args: CheckArgs) -> Result<ExitCode> {
    let schema = build_schema(&args)?;
    let data = form_data(&args)?;

    let outcome = if args.memory {
        validate(schema, &data, &MemoryStore::new()).await?
    } else {
        let store = SqlStore::connect(&config.database.uri)
            .await
            .context("could not connect to the database")?;
        validate(schema, &data, &store).await?
    };

    let (report, code) = match &outcome {
        Outcome::Accepted(cleaned) => (
            json!({ "form": cleaned.form(), "state": "accepted", "data": cleaned }),
            ExitCode::SUCCESS,
        ),
        Outcome::Rejected(rejection) => (
            json!({ "form": rejection.form(), "state": "rejected", "errors": rejection.errors() }),
            ExitCode::from(1),
        ),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    if outcome.is_accepted() {
        eprintln!("{}", "accepted".green().bold());
    } else {
        eprintln!("{}", "rejected".red().bold());
    }

    Ok(code)
}

async fn validate<S: RecordStore>(schema: FormSchema, data: &FormData, store: &S) -> Result<Outcome> {
    info!(form = schema.name(), store = store.name(), "validating submission");
    schema.bind(data).validate(store).await.map_err(|e| {
        error!(error = %e, "validation aborted");
        anyhow!("the submission could not be validated right now")
    })
}

fn build_schema(args: &CheckArgs) -> Result<FormSchema> {
    let roles = parse_roles(&args.roles)?;

    let schema = match args.form {
        FormName::Registration => forms::registration(),
        FormName::Login => forms::login(),
        FormName::RequestReset => forms::request_reset(),
        FormName::ResetPassword => forms::reset_password(),
        FormName::Role => forms::role(),
        FormName::AddUser => forms::add_user(roles),
        FormName::EditUser => {
            let login_name = args
                .login_name
                .clone()
                .context("edit-user needs --login-name")?;
            forms::edit_user(login_name, roles)
        }
        FormName::UpdateAccount => {
            let id = args.current_user.context("update-account needs --current-user")?;
            forms::update_account(Identity::new(id))
        }
    };

    Ok(schema)
}

fn parse_roles(raw: &[String]) -> Result<Vec<Choice>> {
    raw.iter()
        .map(|entry| {
            let (id, name) = entry
                .split_once(':')
                .with_context(|| format!("role must look like id:name, got {:?}", entry))?;
            let id = id
                .trim()
                .parse()
                .with_context(|| format!("role id is not a number: {:?}", id))?;
            Ok(Choice::new(id, name.trim()))
        })
        .collect()
}

fn split_pair(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("expected NAME=VALUE, got {:?}", raw),
    }
}

fn form_data(args: &CheckArgs) -> Result<FormData> {
    let mut data = FormData::new();

    for raw in &args.fields {
        let (name, value) = split_pair(raw)?;
        data.insert(name, value);
    }

    for raw in &args.files {
        let (name, path) = split_pair(raw)?;
        let path = PathBuf::from(path);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read upload: {:?}", path))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        data = data.with_file(name, FileUpload::new(filename, bytes));
    }

    Ok(data)
}
