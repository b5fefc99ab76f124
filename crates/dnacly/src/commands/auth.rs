//! Auth command handler.

use serde::Serialize;

use dnacly_core::{Controller, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct TokenOutput<'a> {
    token: &'a str,
}

pub async fn handle<S: Session>(
    controller: &mut Controller<S>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let token = controller.authenticate().await?;
    let data = TokenOutput {
        token: token.expose(),
    };

    let out = output::render_single(
        &global.output,
        &data,
        |t| Ok(t.token.to_owned()),
        |t| t.token.to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    output::success(
        &format!(
            "Authenticated as {}; token cached for this session",
            controller.client().credentials().username
        ),
        &global.color,
        global.quiet,
    );
    Ok(())
}
