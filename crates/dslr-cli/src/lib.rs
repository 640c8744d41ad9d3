pub mod logreg;
