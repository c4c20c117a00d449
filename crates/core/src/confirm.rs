use crate::traits::Confirmation;
use std::io::{self, BufRead, Write};

/// Exact accepted answer, compared case-insensitively after trimming.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Prompts on a writer and reads one line of answer from a reader.
///
/// End of input counts as a refusal.
pub struct LineConfirmation<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirmation<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LineConfirmation<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirmation for LineConfirmation<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }
}

/// Non-interactive runs: every question is answered yes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirmation for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &str) -> io::Result<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str) -> io::Result<(bool, String)> {
        let mut prompt = Vec::new();
        let accepted = LineConfirmation::new(Cursor::new(input.as_bytes()), &mut prompt)
            .confirm("Continue? (y/n): ")?;
        Ok((accepted, String::from_utf8_lossy(&prompt).into_owned()))
    }

    #[test]
    fn only_y_is_accepted() -> io::Result<()> {
        assert!(answer("y\n")?.0);
        assert!(answer("Y\n")?.0);
        assert!(answer("  y  \n")?.0);
        assert!(!answer("yes\n")?.0);
        assert!(!answer("n\n")?.0);
        assert!(!answer("\n")?.0);
        Ok(())
    }

    #[test]
    fn end_of_input_declines() -> io::Result<()> {
        assert!(!answer("")?.0);
        Ok(())
    }

    #[test]
    fn prompt_is_written_before_reading() -> io::Result<()> {
        assert_eq!(answer("y\n")?.1, "Continue? (y/n): ");
        Ok(())
    }

    #[test]
    fn always_confirm_accepts() -> io::Result<()> {
        assert!(AlwaysConfirm.confirm("anything")?);
        Ok(())
    }
}
