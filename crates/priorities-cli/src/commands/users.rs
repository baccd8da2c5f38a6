use crate::commands::common::{format_user_line, load_fixtures, today};
use crate::error::CliError;

pub fn run_users(as_json: bool) -> Result<(), CliError> {
    let fixtures = load_fixtures()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&fixtures.users)?);
    } else {
        let today = today();
        for user in &fixtures.users {
            println!("{}", format_user_line(user, today));
        }
    }

    Ok(())
}
