use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum OutputBlock {
    Title(String),
    Text(String),
    Event(String),
    Speech { speaker: String, line: String },
    Status(String),
}

#[derive(Default, Debug)]
pub struct Output {
    pub blocks: Vec<OutputBlock>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Title(s));
        }
    }

    pub fn say(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Text(s));
        }
    }

    pub fn event(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Event(s));
        }
    }

    pub fn speech(&mut self, speaker: impl Into<String>, line: impl Into<String>) {
        let line = line.into();
        if !line.trim().is_empty() {
            self.blocks.push(OutputBlock::Speech {
                speaker: speaker.into(),
                line,
            });
        }
    }

    pub fn set_status(&mut self, s: impl Into<String>) {
        let s = s.into();
        if s.trim().is_empty() {
            return;
        }

        // ensure only one Status block exists, always last
        self.blocks.retain(|b| !matches!(b, OutputBlock::Status(_)));
        self.blocks.push(OutputBlock::Status(s));
    }

    pub fn extend(&mut self, other: Output) {
        let mut status = None;
        for block in other.blocks {
            match block {
                OutputBlock::Status(s) => status = Some(s),
                b => self.blocks.push(b),
            }
        }
        match status {
            Some(s) => self.set_status(s),
            None => {
                // keep an existing status line last
                if let Some(pos) = self
                    .blocks
                    .iter()
                    .position(|b| matches!(b, OutputBlock::Status(_)))
                {
                    let s = self.blocks.remove(pos);
                    self.blocks.push(s);
                }
            }
        }
    }

    /// All blocks flattened to plain lines, as the terminal prints them.
    pub fn lines(&self) -> Vec<String> {
        self.blocks
            .iter()
            .map(|b| match b {
                OutputBlock::Title(s)
                | OutputBlock::Text(s)
                | OutputBlock::Event(s)
                | OutputBlock::Status(s) => s.clone(),
                OutputBlock::Speech { speaker, line } => format!("{speaker}: \"{line}\""),
            })
            .collect()
    }
}
