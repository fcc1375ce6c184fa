

mod variable;

mod rule;


// Host object binding
mod binding;
