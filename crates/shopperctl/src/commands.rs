//! Command implementations. Each returns the process exit code.

use crate::cli::PredictArgs;
use crate::client::{Answer, ShopperdClient};
use crate::errors::{
    exit_code_for, exit_code_for_client, EXIT_GENERAL_ERROR, EXIT_INVALID_INPUT,
    EXIT_MODEL_UNAVAILABLE, EXIT_SUCCESS,
};
use crate::output;
use anyhow::{Context, Result};
use shopper_common::{
    ErrorResponse, PredictionTrace, Predictor, SessionFeatures, ShopperConfig, ShopperError,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub artifacts: Option<PathBuf>,
}

impl GlobalOpts {
    pub fn load_config(&self) -> shopper_common::Result<ShopperConfig> {
        let mut config = match &self.config {
            Some(path) => ShopperConfig::from_file(path)?,
            None => ShopperConfig::load()?,
        };
        if let Some(dir) = &self.artifacts {
            config.artifacts.dir = dir.clone();
        }
        Ok(config)
    }

    fn load_predictor(&self) -> shopper_common::Result<Predictor> {
        let config = self.load_config()?;
        debug!("Loading artifacts from {}", config.artifacts.dir.display());
        Predictor::from_config(&config)
    }
}

/// Session features from a JSON file, or stdin for "-".
pub fn read_session(path: &Path) -> Result<SessionFeatures> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read session from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).context("Session JSON does not match the expected fields")
}

/// Run one local prediction and render it the way `predict` prints it.
pub fn render_local(
    predictor: &Predictor,
    features: &SessionFeatures,
    json: bool,
    explain: bool,
) -> shopper_common::Result<String> {
    Ok(render_trace(&predictor.explain(features)?, json, explain))
}

/// Render a trace, local or from shopperd, as `predict` prints it.
pub fn render_trace(trace: &PredictionTrace, json: bool, explain: bool) -> String {
    match (json, explain) {
        (true, true) => to_json(trace),
        (true, false) => to_json(&trace.result),
        (false, true) => format!(
            "{}\n{}",
            output::format_trace(trace),
            output::format_result(&trace.result)
        ),
        (false, false) => output::format_result(&trace.result),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

pub async fn predict(opts: &GlobalOpts, args: PredictArgs) -> Result<i32> {
    let base = match &args.input {
        Some(path) => read_session(path)?,
        None => SessionFeatures::default(),
    };
    let features = args.session.apply(base);
    debug!("Session: {:?}", features);

    if let Some(url) = &args.remote {
        return predict_remote(url, &features, args.json, args.explain).await;
    }

    let predictor = match opts.load_predictor() {
        Ok(predictor) => predictor,
        Err(e) => return Ok(report(&e)),
    };
    match render_local(&predictor, &features, args.json, args.explain) {
        Ok(text) => {
            println!("{}", text);
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(report(&e)),
    }
}

async fn predict_remote(
    url: &str,
    features: &SessionFeatures,
    json: bool,
    explain: bool,
) -> Result<i32> {
    let client = ShopperdClient::new(url)?;

    let answer = if explain {
        client
            .explain(features)
            .await
            .map(|answer| answer.map(|trace| render_trace(&trace, json, true)))
    } else {
        client.predict(features).await.map(|answer| {
            answer.map(|result| {
                if json {
                    to_json(&result)
                } else {
                    output::format_result(&result)
                }
            })
        })
    };

    match answer {
        Ok(Answer::Ok(text)) => {
            println!("{}", text);
            Ok(EXIT_SUCCESS)
        }
        Ok(Answer::Rejected(err)) => Ok(report_remote(&err)),
        Err(e) => {
            eprintln!("{}", e);
            Ok(exit_code_for_client(&e))
        }
    }
}

pub fn check(opts: &GlobalOpts) -> i32 {
    match opts.load_predictor() {
        Ok(predictor) => {
            print!("{}", output::format_info(&predictor.artifacts().info()));
            EXIT_SUCCESS
        }
        Err(e) => report(&e),
    }
}

pub fn columns() -> i32 {
    print!("{}", output::format_columns());
    EXIT_SUCCESS
}

fn report(err: &ShopperError) -> i32 {
    eprintln!("{}", output::format_rejection(&ErrorResponse::from(err)));
    exit_code_for(err)
}

/// Exit code for a rejection the daemon sent back.
pub fn remote_exit_code(err: &ErrorResponse) -> i32 {
    match err.kind.as_str() {
        "unknown_category" | "out_of_domain" | "invalid_request" => EXIT_INVALID_INPUT,
        "model_unavailable" => EXIT_MODEL_UNAVAILABLE,
        _ => EXIT_GENERAL_ERROR,
    }
}

fn report_remote(err: &ErrorResponse) -> i32 {
    eprintln!("{}", output::format_rejection(err));
    remote_exit_code(err)
}
