//! Train entropy and impurity trees, prune both, and report test accuracy.
//!
//! cargo run --example driver -- 20 6 resources/training_set.csv resources/validation_set.csv resources/test_set.csv yes
use bdtree::{read_csv, train, SplitCriterion, TreeConfig};
use std::env;
use std::error::Error;
use std::process;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 7 {
        println!("Needs 6 parameters");
        println!("<L> <K> <training-set> <validation-set> <test-set> <to-print : yes / no>");
        process::exit(0);
    }
    let trials = args[1].parse::<usize>()?;
    let max_prune = args[2].parse::<usize>()?;
    let training = read_csv(&args[3])?;
    let validation = read_csv(&args[4])?;
    let test = read_csv(&args[5])?;
    let should_print = args[6].eq_ignore_ascii_case("yes");

    let entropy_tree = train(&training, SplitCriterion::Entropy)?;
    let impurity_tree = train(&training, SplitCriterion::Impurity)?;
    let config = TreeConfig::default()
        .set_prune_trials(trials)
        .set_max_prune(max_prune);
    let pruned_entropy_tree = entropy_tree.prune_with_config(&validation, &config)?;
    let pruned_impurity_tree = impurity_tree.prune_with_config(&validation, &config)?;

    println!("Accuracy of entropy based tree: {} %", entropy_tree.accuracy(&test)?);
    println!(
        "Post pruning accuracy of entropy based tree: {} %",
        pruned_entropy_tree.accuracy(&test)?
    );
    println!("Accuracy of impurity based tree: {} %", impurity_tree.accuracy(&test)?);
    println!(
        "Post pruning accuracy of impurity based tree: {} %",
        pruned_impurity_tree.accuracy(&test)?
    );

    if should_print {
        println!("Entropy based tree\n{}", entropy_tree.render()?);
        println!("Pruned entropy based tree\n{}", pruned_entropy_tree.render()?);
        println!("Impurity based tree\n{}", impurity_tree.render()?);
        println!("Pruned impurity based tree\n{}", pruned_impurity_tree.render()?);
    }

    Ok(())
}
