//! DIMACS CNF format parser and printer.
//!
//! The interchange format of the SAT competitions: an optional run of `c`
//! comment lines, a `p cnf <vars> <clauses>` header, then
//! whitespace-separated literals with `0` terminating each clause. Clauses
//! may span lines.

use perigee_base::{Error, Result};
use std::io::{BufRead, BufReader, Read};

/// A CNF formula in DIMACS form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimacsCnf {
    /// Number of variables declared by the header.
    pub num_vars: u32,
    /// Clauses as literal runs.
    pub clauses: Vec<Vec<i32>>,
}

impl DimacsCnf {
    /// Reads a formula from any `Read` source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let input = BufReader::new(reader);
        let mut num_vars: Option<u32> = None;
        let mut clauses = Vec::new();
        let mut current = Vec::new();

        for raw in input.lines() {
            let raw = raw?;
            let line = raw.trim();
            if line.starts_with('c') || line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix('p') {
                if num_vars.is_some() {
                    return Err(Error::Parse("duplicate DIMACS header".to_string()));
                }
                let fields: Vec<&str> = rest.split_whitespace().collect();
                if fields.len() < 3 || fields[0] != "cnf" {
                    return Err(Error::Parse(format!("invalid DIMACS header: {line}")));
                }
                let vars = fields[1]
                    .parse()
                    .map_err(|e| Error::Parse(format!("invalid variable count: {e}")))?;
                let declared: usize = fields[2]
                    .parse()
                    .map_err(|e| Error::Parse(format!("invalid clause count: {e}")))?;
                num_vars = Some(vars);
                clauses.reserve(declared);
                continue;
            }

            if num_vars.is_none() {
                return Err(Error::Parse("missing 'p cnf' header".to_string()));
            }
            for token in line.split_whitespace() {
                let lit: i32 = token
                    .parse()
                    .map_err(|e| Error::Parse(format!("invalid literal {token:?}: {e}")))?;
                if lit == 0 {
                    clauses.push(std::mem::take(&mut current));
                } else {
                    current.push(lit);
                }
            }
        }

        // tolerate a final clause without its terminating zero
        if !current.is_empty() {
            clauses.push(current);
        }

        match num_vars {
            Some(num_vars) => Ok(Self { num_vars, clauses }),
            None => Err(Error::Parse("missing 'p cnf' header".to_string())),
        }
    }

    /// Parses a formula from in-memory text.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Prints the formula back as DIMACS text.
    #[must_use]
    pub fn to_dimacs(&self) -> String {
        use std::fmt::Write;

        let mut out = format!("p cnf {} {}\n", self.num_vars, self.clauses.len());
        for clause in &self.clauses {
            for lit in clause {
                let _ = write!(out, "{lit} ");
            }
            out.push_str("0\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimacs() {
        let input = "
c simple satisfiable instance
p cnf 4 3
1 -3 0
2 3 -4 0
-1 0
";
        let cnf = DimacsCnf::parse(input).unwrap();
        assert_eq!(cnf.num_vars, 4);
        assert_eq!(
            cnf.clauses,
            vec![vec![1, -3], vec![2, 3, -4], vec![-1]]
        );
    }

    #[test]
    fn test_parse_clause_spanning_lines() {
        let input = "p cnf 4 2\n1 2\n-3 0 4\n-1 0";
        let cnf = DimacsCnf::parse(input).unwrap();
        assert_eq!(cnf.clauses, vec![vec![1, 2, -3], vec![4, -1]]);
    }

    #[test]
    fn test_parse_missing_header() {
        assert!(matches!(
            DimacsCnf::parse("1 2 0\n"),
            Err(Error::Parse(_))
        ));
        assert!(matches!(DimacsCnf::parse(""), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_bad_token() {
        let input = "p cnf 2 1\n1 x 0\n";
        assert!(matches!(DimacsCnf::parse(input), Err(Error::Parse(_))));
    }

    #[test]
    fn test_round_trip() {
        let input = "p cnf 3 2\n1 -2 0\n2 3 0\n";
        let cnf = DimacsCnf::parse(input).unwrap();
        assert_eq!(cnf.to_dimacs(), input);
        assert_eq!(DimacsCnf::parse(&cnf.to_dimacs()).unwrap(), cnf);
    }

    #[test]
    fn test_unterminated_final_clause() {
        let cnf = DimacsCnf::parse("p cnf 2 1\n1 2\n").unwrap();
        assert_eq!(cnf.clauses, vec![vec![1, 2]]);
    }
}
