//! `Run(args) -> Result`, implemented once for the tagged `Tool` variant so
//! dispatch is an exhaustive match rather than a name-string router.

use crate::error::{Result, ToolError};
use crate::generator::Generator;
use crate::ingest;
use crate::sandbox;
use crate::sql::SqlStore;
use crate::tool::Tool;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use web::SearchEngine;

#[derive(Debug, Clone)]
pub enum ToolArgs {
    Script { source: String },
    Sql { db_path: String, query: String, allow_write: bool },
    Ingest { path: String },
    Text { input: String },
}

pub struct ToolContext {
    pub sql_store: Arc<SqlStore>,
    pub project_root: PathBuf,
    pub search_engines: Vec<Arc<dyn SearchEngine>>,
    pub http_client: reqwest::Client,
    pub generator: Option<Arc<dyn Generator>>,
}

#[async_trait]
pub trait Run {
    async fn run(&self, args: ToolArgs, ctx: &ToolContext) -> Result<String>;
}

#[async_trait]
impl Run for Tool {
    async fn run(&self, args: ToolArgs, ctx: &ToolContext) -> Result<String> {
        match self {
            Tool::Python => sandbox::run_python(&script_arg(args)?).await,
            Tool::Js => sandbox::run_js(&script_arg(args)?).await,
            Tool::Ts => sandbox::run_js(&script_arg(args)?).await,
            Tool::Sympy => sandbox::run_sympy(&script_arg(args)?).await,

            Tool::Sql => {
                let (db_path, query, allow_write) = sql_args(args)?;
                let result = ctx.sql_store.run(&db_path, &query, allow_write)?;
                Ok(render_rows(&result.columns, &result.rows))
            }
            Tool::SqlSchema => {
                let (db_path, _, _) = sql_args(args)?;
                let result = ctx.sql_store.schema(&db_path)?;
                Ok(render_rows(&result.columns, &result.rows))
            }

            Tool::Ingest => {
                let path = ingest_arg(args)?;
                let resolved = ingest::resolve_under_root(&ctx.project_root, &path)?;
                tokio::fs::read_to_string(&resolved).await.map_err(|e| ToolError::SandboxError(e.to_string()))
            }

            Tool::Search => {
                let query = text_arg(args)?;
                let engines: Vec<&dyn SearchEngine> = ctx.search_engines.iter().map(|e| e.as_ref()).collect();
                let results = web::search(&engines, &query, 5).await?;
                Ok(web::format_citations(&results))
            }
            Tool::Fetch => {
                let url = text_arg(args)?;
                let page = web::fetch_page(&ctx.http_client, &url).await?;
                Ok(page.text)
            }

            Tool::Summarize => {
                let input = text_arg(args)?;
                generate(ctx, &format!("Summarize the following text:\n\n{input}")).await
            }
            Tool::Analyze => {
                let input = text_arg(args)?;
                generate(ctx, &format!("Analyze the following code and describe what it does:\n\n{input}")).await
            }
            Tool::Visualize => {
                let input = text_arg(args)?;
                generate(ctx, &format!("Produce chart-ready JSON data for:\n\n{input}")).await
            }
        }
    }
}

async fn generate(ctx: &ToolContext, prompt: &str) -> Result<String> {
    let generator = ctx.generator.as_ref().ok_or_else(|| ToolError::SandboxError("no generator configured".to_string()))?;
    generator.generate(prompt).await
}

fn script_arg(args: ToolArgs) -> Result<String> {
    match args {
        ToolArgs::Script { source } => Ok(source),
        _ => Err(ToolError::SandboxError("tool expects script args".to_string())),
    }
}

fn sql_args(args: ToolArgs) -> Result<(String, String, bool)> {
    match args {
        ToolArgs::Sql { db_path, query, allow_write } => Ok((db_path, query, allow_write)),
        _ => Err(ToolError::SandboxError("tool expects sql args".to_string())),
    }
}

fn ingest_arg(args: ToolArgs) -> Result<String> {
    match args {
        ToolArgs::Ingest { path } => Ok(path),
        _ => Err(ToolError::SandboxError("tool expects ingest args".to_string())),
    }
}

fn text_arg(args: ToolArgs) -> Result<String> {
    match args {
        ToolArgs::Text { input } => Ok(input),
        _ => Err(ToolError::SandboxError("tool expects text args".to_string())),
    }
}

fn render_rows(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut out = vec![columns.join("\t")];
    out.extend(rows.iter().map(|row| row.join("\t")));
    out.join("\n")
}

impl From<web::WebError> for ToolError {
    fn from(error: web::WebError) -> Self {
        ToolError::SandboxError(error.to_string())
    }
}
