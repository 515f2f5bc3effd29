use anyhow::Result;
use trendtap_common::password::generate_password;

pub(crate) async fn command(length: usize, no_special: bool) -> Result<()> {
    let password = generate_password(length, !no_special)?;
    println!("{password}");
    Ok(())
}
