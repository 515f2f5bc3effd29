use std::io::stdin;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;

pub(crate) fn read_password_input(prompt: &str) -> Result<String> {
    if console::user_attended() {
        Ok(dialoguer::Password::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .interact()?)
    } else {
        let mut input = String::new();
        stdin().read_line(&mut input)?;
        Ok(input.trim_end_matches(['\r', '\n']).to_owned())
    }
}
