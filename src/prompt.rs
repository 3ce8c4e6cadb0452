use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::error::PredictError;
use crate::match_state::{Catalog, MatchInput};
use crate::predictor::{evaluate, OracleHandle};

/// Terminal form: reads answers from `input`, writes questions to `output`.
///
/// Every method returns `Ok(None)` once the input is exhausted.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Pick from a list by 1-based number or exact name.
    pub fn choose(&mut self, question: &str, options: &[String]) -> io::Result<Option<String>> {
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {:>2}) {}", i + 1, option)?;
        }
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            if let Ok(n) = answer.parse::<usize>() {
                if let Some(option) = n.checked_sub(1).and_then(|i| options.get(i)) {
                    return Ok(Some(option.clone()));
                }
            } else if let Some(option) = options.iter().find(|o| **o == answer) {
                return Ok(Some(option.clone()));
            }
            writeln!(
                self.output,
                "Please pick a number between 1 and {} or type a name from the list",
                options.len()
            )?;
        }
    }

    pub fn integer(&mut self, question: &str) -> io::Result<Option<i32>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match answer.parse() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => writeln!(self.output, "Please enter a whole number")?,
            }
        }
    }

    /// Yes/no question; anything but `y`/`yes` is a no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(self
            .ask(question)?
            .map(|a| matches!(a.to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false))
    }

    /// Walk through the whole form.
    pub fn collect(&mut self, catalog: &Catalog) -> io::Result<Option<MatchInput>> {
        let Some(batting_team) = self.choose("Select the batting team", catalog.teams())? else {
            return Ok(None);
        };
        let Some(bowling_team) = self.choose("Select the bowling team", catalog.teams())? else {
            return Ok(None);
        };
        let Some(city) = self.choose(
            "Select the city where the match is being played",
            catalog.cities(),
        )?
        else {
            return Ok(None);
        };
        let Some(target) = self.integer("Target")? else {
            return Ok(None);
        };
        let Some(score) = self.integer("Score")? else {
            return Ok(None);
        };
        let Some(overs) = self.integer("Overs Completed")? else {
            return Ok(None);
        };
        let Some(wickets) = self.integer("Wickets Fallen")? else {
            return Ok(None);
        };
        Ok(Some(MatchInput {
            batting_team,
            bowling_team,
            city,
            target,
            score,
            overs,
            wickets,
        }))
    }

    /// Evaluate matches until the user stops or input runs out.
    ///
    /// Input and model errors are shown and the session carries on.
    pub fn run(&mut self, catalog: &Catalog, oracle: &OracleHandle) -> io::Result<()> {
        writeln!(self.output, "IPL Win Predictor")?;
        loop {
            let Some(input) = self.collect(catalog)? else {
                return Ok(());
            };
            let result = input
                .into_state(catalog)
                .map_err(PredictError::from)
                .and_then(|state| evaluate(&state, oracle));
            match result {
                Ok(evaluation) => writeln!(self.output, "\n{}\n", evaluation.rendered())?,
                Err(e) => {
                    warn!("Evaluation rejected: {}", e);
                    writeln!(self.output, "\n{}\n", e)?;
                }
            }
            if !self.confirm("Evaluate another match? [y/N]")? {
                return Ok(());
            }
        }
    }
}
