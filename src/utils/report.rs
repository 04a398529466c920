use std::io::Write;

const RULE_WIDTH: usize = 70;

/// Human-readable report sink. Every audit step writes through it.
pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        // Falha de escrita no stdout não deve derrubar a auditoria
        if let Err(e) = writeln!(self.out, "{}", text.as_ref()) {
            log::debug!("Report write failed: {}", e);
        }
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    pub fn rule(&mut self) {
        self.line("=".repeat(RULE_WIDTH));
    }

    pub fn banner(&mut self, title: &str) {
        self.rule();
        self.line(title);
        self.rule();
        self.blank();
    }

    pub fn flush(&mut self) {
        let _ = self.out.flush();
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
