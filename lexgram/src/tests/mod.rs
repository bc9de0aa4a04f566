mod automata_tests;
