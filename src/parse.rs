use crate::*;
use pest::{iterators, Parser};

#[derive(Parser)]
#[grammar_inline = r####"
expr  = _{ SOI ~ disj ~ EOI }
disj  =  { conj ~ ( "|"  ~ conj )* }
conj  =  { term ~ ( "&" ~ term )* }
term  = _{ neg | grp }
neg   =  { ("!" | "~") ~ grp }
grp   = _{ neg | bt | bf | lit | "(" ~ disj ~ ")" | "[" ~ disj ~ "]" }
bt    =  { ^"true" | "1" }
bf    =  { ^"false" | "0" }
lit   = @{ uid }
uid   = @{ (ASCII_ALPHA | "_") ~ (ASCII_ALPHANUMERIC | "_")* }

WHITESPACE = _{ " " | "\t" | "\n" }
"####]
struct ExpressionParser;

static _NAME_SEPARATORS: [char; 3] = [' ', ',', ';'];

/// Turn strings into variables and structures built on variables.
///
/// Implementors only decide how a single name is mapped to a variable, the
/// other methods split the input and delegate each name to [VariableParser::parse_variable].
pub trait VariableParser {
    fn parse_variable(&mut self, s: &str) -> Result<Variable, TruthError>;

    fn parse_variable_set(&mut self, s: &str) -> Result<VarSet, TruthError> {
        s.split(&_NAME_SEPARATORS[..])
            .filter(|n| !n.is_empty())
            .map(|n| self.parse_variable(n))
            .collect()
    }

    /// Parse an ordered list of inputs, rejecting repeated variables
    fn parse_variable_list(&mut self, s: &str) -> Result<VarList, TruthError> {
        let mut result = VarList::default();
        s.split(&_NAME_SEPARATORS[..])
            .filter(|n| !n.is_empty())
            .map(|n| self.parse_variable(n))
            .try_for_each(|v| result.push(v?))?;
        Ok(result)
    }

    /// Parse a point from a list of literals.
    ///
    /// Each name assigns its variable to 1, or to 0 when prefixed by '!' or '~'.
    fn parse_point(&mut self, s: &str) -> Result<Point, TruthError> {
        let mut point = Point::default();
        for lit in s.split(&_NAME_SEPARATORS[..]).filter(|n| !n.is_empty()) {
            match lit.strip_prefix(&['!', '~'][..]) {
                Some(name) => point.set(self.parse_variable(name)?, false),
                None => point.set(self.parse_variable(lit)?, true),
            }
        }
        Ok(point)
    }

    fn parse_expression(&mut self, s: &str) -> Result<Expr, TruthError> {
        let mut parsed =
            ExpressionParser::parse(Rule::expr, s).map_err(|_| TruthError::InvalidExpression)?;
        let root = parsed.next().ok_or(TruthError::InvalidExpression)?;
        self._load_expr(root)
    }

    fn _load_expr(&mut self, expr: iterators::Pair<Rule>) -> Result<Expr, TruthError> {
        let rule = expr.as_rule();
        match rule {
            Rule::bt => Ok(Expr::from(true)),
            Rule::bf => Ok(Expr::from(false)),
            Rule::lit => self.parse_variable(expr.as_str()).map(Expr::from),
            Rule::neg | Rule::conj | Rule::disj => {
                let mut operands = Vec::new();
                for next in expr.into_inner() {
                    operands.push(self._load_expr(next)?);
                }
                match rule {
                    Rule::neg => operands.pop().map(|e| !e).ok_or(TruthError::InvalidExpression),
                    Rule::conj => Ok(Operator::And.join_all(operands)),
                    _ => Ok(Operator::Or.join_all(operands)),
                }
            }
            // Other rules are hidden
            _ => Err(TruthError::InvalidExpression),
        }
    }
}

/// Parse generic variable names like `_3_` or `3`
pub struct BaseVariableParser;

pub fn parser() -> BaseVariableParser {
    BaseVariableParser {}
}

impl VariableParser for BaseVariableParser {
    fn parse_variable(&mut self, s: &str) -> Result<Variable, TruthError> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use crate::parse::{parser, VariableParser};
    use crate::*;

    #[test]
    fn generic_names() -> Result<(), TruthError> {
        let mut p = parser();
        assert_eq!(p.parse_variable("_12_")?, Variable::from(12));
        assert_eq!(p.parse_variable_list("_2_ _0_")?.as_slice(), &[Variable::from(2), Variable::from(0)]);
        assert!(p.parse_variable_list("_2_ _2_").is_err());

        let point = p.parse_point("_0_ !_2_")?;
        assert_eq!(point.value(Variable::from(0)), Some(true));
        assert_eq!(point.value(Variable::from(2)), Some(false));
        assert_eq!(point.value(Variable::from(1)), None);
        Ok(())
    }

    #[test]
    fn expressions() -> Result<(), TruthError> {
        let mut vs = VarSpace::default();
        let a = vs.provide("a")?;
        let b = vs.provide("b")?;
        let c = vs.provide("c")?;

        assert_eq!(vs.parse_expression("a & !b | c")?, (a & !b) | c);
        assert_eq!(vs.parse_expression("~(a | b) & 1")?, !(a | b));
        assert_eq!(vs.parse_expression("[a & false] | b")?, Expr::from(b));
        assert_eq!(vs.parse_expression("a | b | c")?, a | b | c);

        assert_eq!(vs.parse_expression("a & d"), Err(TruthError::NoSuchVariableName("d".into())));
        assert_eq!(vs.parse_expression("a & "), Err(TruthError::InvalidExpression));
        assert_eq!(vs.parse_expression("a b"), Err(TruthError::InvalidExpression));
        Ok(())
    }
}
