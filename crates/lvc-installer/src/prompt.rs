//! Interactive console messages.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Greeting shown before anything is installed.
pub fn welcome_banner() -> String {
    format!(
        "Welcome to the {} installer\nMade by {}\n",
        crate::BINARY_NAME,
        crate::AUTHOR_NAME
    )
}

/// Print `message` and wait until the user presses Enter.
///
/// End of input counts as Enter.
pub async fn pause<R, W>(input: &mut R, output: &mut W, message: &str) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output
        .write_all(format!("{}\nPress Enter to continue...\n", message).as_bytes())
        .await?;
    output.flush().await?;

    let mut line = String::new();
    input.read_line(&mut line).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_names_program() {
        let banner = welcome_banner();
        assert!(banner.starts_with("Welcome to the lvc installer"));
        assert!(banner.contains("VPeti11"));
    }

    #[tokio::test]
    async fn test_pause_consumes_one_line() {
        let mut input: &[u8] = b"\nrest";
        let mut output = Vec::new();

        pause(&mut input, &mut output, "Ready.").await.unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Ready.\nPress Enter to continue...\n"
        );
        assert_eq!(input, b"rest");
    }

    #[tokio::test]
    async fn test_pause_at_end_of_input() {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        pause(&mut input, &mut output, "Done.").await.unwrap();
    }
}
