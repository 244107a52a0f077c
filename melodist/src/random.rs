// Randomness seam for the random walks.
//
// The walkers never touch a global generator. They are handed something that
// implements `Draw`, a single "pick one of n options" operation. Any
// `rand::Rng` qualifies, so production code passes a `StdRng`; tests that
// need an exact sequence pass `ScriptedDraws`.

use rand::Rng;

/// Uniform choice among `n` options.
pub trait Draw {
    /// Return an index in `[0, n)`. Callers guarantee `n > 0`.
    fn draw(&mut self, n: usize) -> usize;

    /// Pick an element of a non-empty slice.
    fn choose<'a, T>(&mut self, options: &'a [T]) -> &'a T {
        &options[self.draw(options.len())]
    }
}

impl<R: Rng> Draw for R {
    fn draw(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }
}

/// A fixed, repeating list of draws. Each scripted value is reduced modulo
/// the number of options, so one script can drive pools of any size.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedDraws {
    /// An empty script behaves as if it were `[0]`.
    pub fn new(script: Vec<usize>) -> Self {
        ScriptedDraws { script, cursor: 0 }
    }

    /// How many draws have been made so far.
    pub fn draws_made(&self) -> usize {
        self.cursor
    }
}

impl Draw for ScriptedDraws {
    fn draw(&mut self, n: usize) -> usize {
        let value = if self.script.is_empty() {
            0
        } else {
            self.script[self.cursor % self.script.len()]
        };
        self.cursor += 1;
        value % n
    }
}
