use apu_core::error::ApuError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), ApuError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
