//! Describe an encrypted value's envelope.

use anyhow::Result;
use colored::Colorize;
use sealedsecret_seal::envelope::TAG_BYTES;
use sealedsecret_seal::{Envelope, SealedValue};

/// Segment sizes of one envelope.
#[derive(Debug, PartialEq, Eq)]
struct Layout {
    total: usize,
    wrapped_key: usize,
    payload: usize,
}

impl Layout {
    /// Modulus size implied by the wrapped key.
    fn key_bits(&self) -> usize {
        self.wrapped_key * 8
    }

    fn plaintext(&self) -> usize {
        self.payload - TAG_BYTES
    }
}

pub fn execute(value: &str) -> Result<()> {
    let text = if value == "-" {
        super::read_stdin()?
    } else {
        value.to_string()
    };
    let layout = layout(&text)?;

    println!("\n{}", "Sealed Envelope".cyan().bold());
    println!("{}", "=".repeat(50));
    println!("  Total bytes: {}", layout.total);
    println!("  Wrapped key: {} bytes ({}-bit RSA)", layout.wrapped_key, layout.key_bits());
    println!("  Payload: {} bytes", layout.payload);
    println!("  Plaintext length: {} bytes", layout.plaintext());
    Ok(())
}

fn layout(text: &str) -> Result<Layout> {
    let sealed = SealedValue::parse(text)?;
    let blob = sealed.decode()?;
    let envelope = Envelope::parse(&blob)?;
    Ok(Layout {
        total: blob.len(),
        wrapped_key: envelope.wrapped_key.len(),
        payload: envelope.payload.len(),
    })
}
