use {
    crate::*,
    nom::{
        character::complete::line_ending,
        combinator::{map, opt},
        error::Error,
        multi::many1,
        sequence::terminated,
        Err, IResult,
    },
    rayon::iter::{IntoParallelRefIterator, ParallelIterator},
};

/// A door code: one or more digit keys followed by the terminating `A` press.
#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone)]
pub struct Code(Vec<Key>);

impl Code {
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// The digits folded as a base-10 integer, leading zeros and the trailing `A` dropped.
    pub fn numeric_part(&self) -> usize {
        self.0[..self.0.len() - 1_usize]
            .iter()
            .fold(0_usize, |numeric_part, key| {
                numeric_part * 10_usize + key.try_digit().unwrap() as usize
            })
    }

    pub fn min_presses(&self, engine: &mut CostEngine, depth: usize) -> Result<usize, SolveError> {
        engine.min_presses(&self.0, depth, Pad::Numeric, None)
    }

    pub fn complexity(&self, engine: &mut CostEngine, depth: usize) -> Result<usize, SolveError> {
        Ok(self.numeric_part() * self.min_presses(engine, depth)?)
    }
}

impl Parse for Code {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            terminated(many1(Key::parse_digit), Key::parse_activate),
            |mut keys: Vec<Key>| {
                keys.push(Key::Activate);

                Self(keys)
            },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Vec<Code>);

impl Solution {
    pub const SHALLOW_DEPTH: usize = 2_usize;
    pub const DEEP_DEPTH: usize = 25_usize;

    pub fn codes(&self) -> &[Code] {
        &self.0
    }

    /// Weighted sum over all codes of numeric part times minimum press count, with a single
    /// cache shared across the codes.
    pub fn complexity_sum(&self, depth: usize) -> Result<usize, SolveError> {
        self.complexity_sum_with_engine(&mut CostEngine::new(), depth)
    }

    /// Same sum as `complexity_sum`, fanned out across codes with an independent cache per
    /// code. Each code's evaluation is read-only outside its own engine, so no results depend
    /// on sharing.
    pub fn par_complexity_sum(&self, depth: usize) -> Result<usize, SolveError> {
        self.0
            .par_iter()
            .map(|code: &Code| code.complexity(&mut CostEngine::new(), depth))
            .try_reduce(|| 0_usize, |a: usize, b: usize| Ok(a + b))
    }

    fn complexity_sum_with_engine(
        &self,
        engine: &mut CostEngine,
        depth: usize,
    ) -> Result<usize, SolveError> {
        self.0.iter().try_fold(0_usize, |complexity_sum, code| {
            Ok(complexity_sum + code.complexity(engine, depth)?)
        })
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(many1(terminated(Code::parse, opt(line_ending))), Self)(input)
    }
}

impl RunQuestions for Solution {
    /// Two robot layers is shallow enough to sanity-check by hand against the worked example
    /// sequences, which was a lifesaver while getting the ordering search right.
    fn q1_internal(&mut self, args: &QuestionArgs) {
        let mut engine: CostEngine = CostEngine::new();

        match self.complexity_sum_with_engine(&mut engine, Self::SHALLOW_DEPTH) {
            Ok(complexity_sum) => {
                dbg!(complexity_sum);

                if args.verbose {
                    for code in &self.0 {
                        if let Ok(min_presses) = code.min_presses(&mut engine, Self::SHALLOW_DEPTH)
                        {
                            println!(
                                "{}: {min_presses} presses, complexity {}",
                                Key::string_from_iter(code.keys().iter().copied()),
                                code.numeric_part() * min_presses
                            );
                        }
                    }

                    dbg!(engine.cached_states());
                }
            }
            Err(error) => eprintln!("{error:#?}"),
        }
    }

    /// Twenty-five layers would never finish without the memo table. With it, each code's cache
    /// stays small enough that fanning out per code beats sharing one cache across them.
    fn q2_internal(&mut self, _args: &QuestionArgs) {
        match self.par_complexity_sum(Self::DEEP_DEPTH) {
            Ok(complexity_sum) => {
                dbg!(complexity_sum);
            }
            Err(error) => eprintln!("{error:#?}"),
        }
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self::parse(input)?.1)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const SOLUTION_STRS: &'static [&'static str] = &["\
        029A\n\
        980A\n\
        179A\n\
        456A\n\
        379A\n"];
    const NUMERIC_PARTS: &'static [usize] =
        &[29_usize, 980_usize, 179_usize, 456_usize, 379_usize];
    const SHALLOW_COMPLEXITIES: &'static [usize] = &[
        1972_usize,
        58800_usize,
        12172_usize,
        29184_usize,
        24256_usize,
    ];
    const SHALLOW_COMPLEXITY_SUM: usize = 126384_usize;
    const DEEP_PRESSES: &'static [usize] = &[
        82050061710_usize,
        72242026390_usize,
        81251039228_usize,
        80786362258_usize,
        77985628636_usize,
    ];
    const DEEP_COMPLEXITY_SUM: usize = 154115708116294_usize;

    fn solution(index: usize) -> &'static Solution {
        static ONCE_LOCK: OnceLock<Vec<Solution>> = OnceLock::new();

        use Key::{
            Activate as Ac, Eight as K8, Five as K5, Four as K4, Nine as K9, One as K1,
            Seven as K7, Six as K6, Three as K3, Two as K2, Zero as K0,
        };

        &ONCE_LOCK.get_or_init(|| {
            vec![Solution(vec![
                Code(vec![K0, K2, K9, Ac]),
                Code(vec![K9, K8, K0, Ac]),
                Code(vec![K1, K7, K9, Ac]),
                Code(vec![K4, K5, K6, Ac]),
                Code(vec![K3, K7, K9, Ac]),
            ])]
        })[index]
    }

    #[test]
    fn test_try_from_str() {
        for (index, solution_str) in SOLUTION_STRS.iter().copied().enumerate() {
            assert_eq!(
                Solution::try_from(solution_str).as_ref(),
                Ok(solution(index))
            );
        }
    }

    #[test]
    fn test_try_from_str_rejects_malformed_codes() {
        for solution_str in ["", "A\n", "12B4A\n", "^v<>A\n", "123\n"] {
            assert!(
                Solution::try_from(solution_str).is_err(),
                "accepted {solution_str:?}"
            );
        }
    }

    #[test]
    fn test_numeric_part() {
        for (code, numeric_part) in solution(0_usize)
            .codes()
            .iter()
            .zip(NUMERIC_PARTS.iter().copied())
        {
            assert_eq!(code.numeric_part(), numeric_part);
        }
    }

    #[test]
    fn test_complexity() {
        let mut engine: CostEngine = CostEngine::new();

        for (code, complexity) in solution(0_usize)
            .codes()
            .iter()
            .zip(SHALLOW_COMPLEXITIES.iter().copied())
        {
            assert_eq!(
                code.complexity(&mut engine, Solution::SHALLOW_DEPTH),
                Ok(complexity)
            );
        }
    }

    #[test]
    fn test_complexity_sum() {
        assert_eq!(
            solution(0_usize).complexity_sum(Solution::SHALLOW_DEPTH),
            Ok(SHALLOW_COMPLEXITY_SUM)
        );
    }

    #[test]
    fn test_deep_min_presses() {
        let mut engine: CostEngine = CostEngine::new();

        for (code, presses) in solution(0_usize)
            .codes()
            .iter()
            .zip(DEEP_PRESSES.iter().copied())
        {
            assert_eq!(
                code.min_presses(&mut engine, Solution::DEEP_DEPTH),
                Ok(presses)
            );
        }
    }

    #[test]
    fn test_deep_complexity_sum() {
        assert_eq!(
            solution(0_usize).complexity_sum(Solution::DEEP_DEPTH),
            Ok(DEEP_COMPLEXITY_SUM)
        );
    }

    #[test]
    fn test_par_complexity_sum_matches_serial() {
        let solution: &Solution = solution(0_usize);

        for depth in [Solution::SHALLOW_DEPTH, Solution::DEEP_DEPTH] {
            assert_eq!(
                solution.par_complexity_sum(depth),
                solution.complexity_sum(depth)
            );
        }
    }
}
