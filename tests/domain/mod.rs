mod domain_model_test;
