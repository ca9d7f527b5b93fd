use truthkit::parse::VariableParser;
use truthkit::*;

fn main() -> Result<(), TruthError> {
    env_logger::init();

    let mut variables = VarSpace::default();
    let e = variables
        .extend()
        .parse_expression("(test | other) & (!myvar | first)")?;
    println!("Basic expression: {}", variables.named(&e));

    let table = TruthTable::from_rule(&e)?.into_table()?;
    println!("{}", variables.named(&table));
    println!("{} satisfying points out of {}", table.satisfy_count(), table.cardinality());

    let test = variables.get_or_err("test")?;
    let cofactor = table.restrict(&Point::from((test, false)));
    println!("With test=0: {}", variables.named(&cofactor.to_expr(false)));

    let unknown = TruthTable::plane_coded([test], "-0".chars())?;
    let combined = &unknown + &table;
    println!("{}", combined);

    println!("CNF: {}", variables.named(&table.to_expr(true)));
    Ok(())
}
