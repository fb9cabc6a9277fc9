use {
    crate::*,
    glam::IVec2,
    std::collections::HashMap,
};

/// A failure while computing a minimum press count.
///
/// Both variants are fatal for the computation that produced them: neither is transient, since
/// the whole solve is deterministic and pure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SolveError {
    /// The requested symbol is not on the designated pad: malformed input.
    InvalidKey(InvalidKey),

    /// No gap-avoiding ordering exists between two cells. Every correctly modeled pad has at
    /// least one, so this indicates a layout defect rather than bad input.
    NoValidPath { from: IVec2, to: IVec2, pad: Pad },
}

impl From<InvalidKey> for SolveError {
    fn from(invalid_key: InvalidKey) -> Self {
        Self::InvalidKey(invalid_key)
    }
}

/// All distinct orderings of `move_set` whose walk from `start` stays on valid cells of `pad`.
///
/// Each ordering is produced exactly once: the backtracking chooses which run to draw the next
/// key from, so repeated keys cannot yield duplicate orderings. A branch is abandoned at the
/// first step that lands off the pad or on its gap.
///
/// Every ordering must be explored rather than one canonical interleaving, because at depth > 0
/// different orderings cost different amounts one layer up the chain.
pub fn valid_orderings(pad: Pad, start: IVec2, move_set: MoveSet) -> Vec<Vec<Key>> {
    let mut orderings: Vec<Vec<Key>> = Vec::new();
    let mut ordering: Vec<Key> = Vec::with_capacity(move_set.len());

    push_valid_orderings(pad, start, move_set.runs(), &mut ordering, &mut orderings);

    orderings
}

fn push_valid_orderings(
    pad: Pad,
    pos: IVec2,
    runs: [Run; 2_usize],
    ordering: &mut Vec<Key>,
    orderings: &mut Vec<Vec<Key>>,
) {
    if runs.iter().all(|run: &Run| run.count == 0_u8) {
        orderings.push(ordering.clone());
    } else {
        for index in 0_usize..runs.len() {
            let run: Run = runs[index];

            if run.count == 0_u8 {
                continue;
            }

            // Runs only ever hold arrow keys
            let next: IVec2 = pos + run.key.try_step().unwrap();

            if pad.contains(next) {
                let mut next_runs: [Run; 2_usize] = runs;

                next_runs[index].count -= 1_u8;
                ordering.push(run.key);
                push_valid_orderings(pad, next, next_runs, ordering, orderings);
                ordering.pop();
            }
        }
    }
}

/// Memo key: one entry per distinct solver state.
///
/// `start` is `None` at the start of a layer's sequence, before the first key resolves it to the
/// pad's `A` cell.
#[derive(Clone, Eq, Hash, PartialEq)]
struct CacheKey {
    keys: Box<[Key]>,
    depth: usize,
    pad: Pad,
    start: Option<IVec2>,
}

/// Computes minimum outer-layer press counts for key sequences typed through a chain of
/// directional-keypad robots.
///
/// The cache is append-only for the engine's lifetime and is what makes deep chains tractable:
/// each layer fans out into every valid ordering of the previous layer's moves, so without it
/// the cost of a depth-25 solve compounds exponentially.
#[derive(Default)]
pub struct CostEngine {
    cache: HashMap<CacheKey, usize>,
}

impl CostEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The minimum number of presses at the outermost layer to type `keys` on `pad` through
    /// `depth` directional-keypad robot layers, starting from `start` (`None` for the rest
    /// position, `A`).
    pub fn min_presses(
        &mut self,
        keys: &[Key],
        depth: usize,
        pad: Pad,
        start: Option<IVec2>,
    ) -> Result<usize, SolveError> {
        if keys.is_empty() {
            return Ok(0_usize);
        }

        let cache_key: CacheKey = CacheKey {
            keys: keys.into(),
            depth,
            pad,
            start,
        };

        if let Some(&presses) = self.cache.get(&cache_key) {
            return Ok(presses);
        }

        let curr: IVec2 = start.unwrap_or_else(|| pad.activate_position());
        let next: IVec2 = pad.position_of(keys[0_usize])?;
        let move_set: MoveSet = MoveSet::between(curr, next);

        let first_key_presses: usize = if depth == 0_usize {
            // Every ordering costs the human the same; the `+ 1` is pressing the key itself
            move_set.len() + 1_usize
        } else {
            let mut min_ordering_presses: Option<usize> = None;

            for mut ordering in valid_orderings(pad, curr, move_set) {
                ordering.push(Key::Activate);

                // The next layer up starts from rest: every arm returns to `A` between the
                // commands it relays.
                let presses: usize =
                    self.min_presses(&ordering, depth - 1_usize, Pad::Directional, None)?;

                if min_ordering_presses.map_or(true, |min: usize| presses < min) {
                    min_ordering_presses = Some(presses);
                }
            }

            min_ordering_presses.ok_or(SolveError::NoValidPath {
                from: curr,
                to: next,
                pad,
            })?
        };

        let presses: usize =
            first_key_presses + self.min_presses(&keys[1_usize..], depth, pad, Some(next))?;

        self.cache.insert(cache_key, presses);

        Ok(presses)
    }

    /// Number of distinct states memoized so far.
    pub fn cached_states(&self) -> usize {
        self.cache.len()
    }
}
