mod refinement_service_test;
mod review_filter_test;
