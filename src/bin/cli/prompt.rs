//! Line-oriented exam presenter

use std::io::{self, BufRead, Write};

use sword_lib::flashcards::{ExamContext, Flashcard, Judge, Judgment, MemoryLevel};

/// Asks for each judgment on a line of input
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, card: Flashcard<'_>, context: ExamContext) -> io::Result<Judgment> {
        writeln!(
            self.output,
            "\n[{}] {} left, {} reviewed",
            context.level, context.remaining, context.repeats
        )?;
        write!(self.output, "{}  (Enter to reveal) ", card.label)?;
        self.output.flush()?;
        if self.read_line()?.is_none() {
            return Ok(Judgment::Quit);
        }
        writeln!(self.output, "{}", card.transcript)?;

        loop {
            write!(self.output, "[h]ard [n]ormal [g]ood [q]uit: ")?;
            self.output.flush()?;
            let Some(answer) = self.read_line()? else {
                return Ok(Judgment::Quit);
            };
            match parse_answer(&answer) {
                Some(judgment) => return Ok(judgment),
                None => writeln!(self.output, "Unrecognized answer {:?}", answer.trim())?,
            }
        }
    }

    /// Next line without its terminator, `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> Judge for LinePrompt<R, W> {
    fn judge(&mut self, card: Flashcard<'_>, context: ExamContext) -> Judgment {
        match self.ask(card, context) {
            Ok(judgment) => judgment,
            Err(e) => {
                log::warn!("Prompt failed, stopping the exam: {}", e);
                Judgment::Quit
            }
        }
    }
}

fn parse_answer(answer: &str) -> Option<Judgment> {
    let answer = answer.trim();
    if matches!(answer.to_ascii_lowercase().as_str(), "q" | "quit") {
        return Some(Judgment::Quit);
    }
    answer.parse::<MemoryLevel>().ok().map(Judgment::Level)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Flashcard<'static> = Flashcard {
        label: "chien",
        transcript: "dog",
    };

    fn context() -> ExamContext {
        ExamContext {
            level: MemoryLevel::Hard,
            remaining: 2,
            repeats: 1,
        }
    }

    fn judge_with(input: &str) -> (Judgment, String) {
        let mut prompt = LinePrompt::new(input.as_bytes(), Vec::new());
        let judgment = prompt.judge(CARD, context());
        let output = String::from_utf8(prompt.into_output()).unwrap();
        (judgment, output)
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("h"), Some(Judgment::Level(MemoryLevel::Hard)));
        assert_eq!(parse_answer(" Normal "), Some(Judgment::Level(MemoryLevel::Normal)));
        assert_eq!(parse_answer("3"), Some(Judgment::Level(MemoryLevel::Good)));
        assert_eq!(parse_answer("Q"), Some(Judgment::Quit));
        assert_eq!(parse_answer("maybe"), None);
        assert_eq!(parse_answer(""), None);
    }

    #[test]
    fn test_reveals_transcript_then_reads_answer() {
        let (judgment, output) = judge_with("\ng\n");

        assert_eq!(judgment, Judgment::Level(MemoryLevel::Good));
        assert!(output.contains("[hard] 2 left, 1 reviewed"));
        assert!(output.contains("chien"));
        assert!(output.contains("dog"));
    }

    #[test]
    fn test_reprompts_on_bad_answer() {
        let (judgment, output) = judge_with("\nx\n\nn\n");

        assert_eq!(judgment, Judgment::Level(MemoryLevel::Normal));
        assert_eq!(output.matches("[h]ard [n]ormal [g]ood [q]uit").count(), 3);
        assert!(output.contains("Unrecognized answer \"x\""));
    }

    #[test]
    fn test_end_of_input_quits() {
        assert_eq!(judge_with("").0, Judgment::Quit);
        assert_eq!(judge_with("\n").0, Judgment::Quit);
        assert_eq!(judge_with("\nfoo\n").0, Judgment::Quit);
    }

    #[test]
    fn test_transcript_hidden_until_enter() {
        let (_, output) = judge_with("");
        assert!(!output.contains("dog"));
    }
}
