use anyhow::Result;
use trendtap_common::helpers::hash::hash_password;

use super::common::read_password_input;

pub(crate) async fn command() -> Result<()> {
    let password = read_password_input("Password to be hashed")?;
    println!("{}", hash_password(&password));
    Ok(())
}
