mod tests_goto;
