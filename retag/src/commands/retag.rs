use crate::context::AppContext;
use crate::format::Formattable;
use libretag::{Credentials, Resolved, Retagged, Retagger, resolve};
use serde::Serialize;
use tracing::{debug, info};

#[cfg(test)]
#[path = "retag_tests.rs"]
mod tests;

/// Inputs of a single invocation.
#[derive(Debug, Clone, Default)]
pub struct RetagRequest {
    pub args: Vec<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub dry_run: bool,
}

/// What the command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// Resolved but not sent (`--dry-run`)
    Planned(Resolved),
    Retagged(Retagged),
}

impl Formattable for Outcome {
    fn format_pretty(&self) -> String {
        match self {
            Outcome::Planned(op) => format!("Would retag {}", op),
            Outcome::Retagged(retagged) => retagged.to_string(),
        }
    }
}

/// Handle the retag command.
///
/// Arguments are resolved before credentials are looked at, so input errors
/// are always reported first.
pub async fn handle_retag(ctx: &AppContext, request: RetagRequest) -> libretag::Result<Outcome> {
    run(ctx, request).await.inspect_err(|e| {
        debug!(input_error = e.is_resolution_error(), error = %e, "retag failed");
    })
}

async fn run(ctx: &AppContext, request: RetagRequest) -> libretag::Result<Outcome> {
    let op = resolve(request.args.as_slice())?;
    debug!(%op, "resolved arguments");

    if request.dry_run {
        info!("dry run, registry not contacted");
        return Ok(Outcome::Planned(op));
    }

    let credentials = Credentials::from_parts(request.username, request.password)?;
    let retagger = Retagger::from_config(&ctx.config)?;
    let retagged = retagger.retag(&op, &credentials).await?;

    Ok(Outcome::Retagged(retagged))
}
