/// Worker count used for batch mode when `-T0` asks for "auto".
///
/// Leaves one physical core (plus one per eight) for the rest of the system.
pub fn default_nb_workers() -> usize {
    let nb_cores = num_cpus::get_physical().max(1);
    let spared = 1 + (nb_cores >> 3);
    if nb_cores <= spared {
        1
    } else {
        nb_cores - spared
    }
}
