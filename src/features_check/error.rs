"numcvt requires that \"std\" be enabled: the power-of-ten table is built behind std::sync::OnceLock"
