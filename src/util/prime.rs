/// Ascending primes used to size hash tables. Dense at the low end, coarse above
/// the 32-bit range where tables that large are rare.
const PRIME_TABLE: [u64; 237] = [
    7, 11, 13, 17, 19, 23,
    29, 31, 37, 41, 43, 47,
    53, 59, 61, 67, 71, 73,
    79, 83, 89, 97, 101, 103,
    107, 109, 113, 127, 131, 137,
    139, 149, 151, 163, 179, 197,
    223, 239, 263, 293, 313, 347,
    379, 419, 457, 503, 557, 607,
    673, 733, 809, 887, 977, 1069,
    1181, 1297, 1423, 1567, 1721, 1889,
    2081, 2287, 2521, 2767, 3037, 3343,
    3671, 4049, 4441, 4889, 5381, 5897,
    6491, 7129, 7853, 8641, 9511, 10453,
    11503, 12659, 13931, 15329, 16871, 18553,
    20431, 22469, 24733, 27197, 29927, 32933,
    36241, 39869, 43889, 48271, 53117, 58451,
    64319, 70769, 77867, 85691, 94291, 103769,
    114157, 125617, 138209, 152077, 167339, 184133,
    202613, 222941, 245317, 269939, 297019, 326831,
    359633, 395719, 435427, 479131, 527203, 580133,
    638327, 702391, 772903, 850433, 935777, 1029689,
    1133017, 1246733, 1371827, 1509509, 1661003, 1827673,
    2011073, 2212891, 2434963, 2679331, 2948203, 3244067,
    3569611, 3927839, 4322009, 4755761, 5233003, 5758139,
    6335983, 6971827, 7671467, 8441327, 9288449, 10220591,
    11246237, 12374891, 13616723, 14983181, 16486829, 18141283,
    19961827, 21965077, 24169337, 26594819, 29263679, 32200393,
    35431807, 38987519, 42900041, 47205217, 51942403, 57155029,
    62890721, 69202037, 76146667, 83788247, 92196653, 101448901,
    111629641, 122883853, 135272677, 148910521, 163923391, 180449623,
    198642043, 218668609, 240714217, 264982391, 291697243, 321105373,
    353478373, 389115109, 428344667, 471529231, 519067553, 571398587,
    629005471, 692420147, 762228127, 839073973, 923667193, 1016788867,
    1119298847, 1232143607, 1356365081, 1493110249, 1643641667, 1809349291,
    1991763119, 2192567431, 2413616323, 2656950733, 2924817509, 3219689911,
    3544290559, 3901616591, 4294967291, 5600000033, 7395160471, 9580088579,
    12410561777, 16077309041, 20827410613, 26980947559, 34952570239, 45279438877,
    58657419787, 75987975533, 98438909381, 127523056223, 165200223857, 214009252693,
    277239093127, 359150428271, 465262776259, 602726417257, 780804209261, 1011495756163,
    1310345990231, 1697492652517, 2199023255579,
];

/// Returns the first prime in the sizing table that is not less than `n`.
///
/// The result is deterministic for a given `n`, which keeps bucket counts, and
/// therefore serialized hash tables, identical across builds. Past the end of
/// the table the next prime is searched for directly.
pub fn find_prime_at_least(n: u64) -> u64 {
    let idx = PRIME_TABLE.partition_point(|&prime| prime < n);
    match PRIME_TABLE.get(idx) {
        Some(&prime) => prime,
        None => next_prime(n),
    }
}

fn next_prime(n: u64) -> u64 {
    let mut candidate = n | 1;
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

fn is_prime(n: u64) -> bool {
    if n < 4 {
        return n >= 2;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5u64;
    while i.saturating_mul(i) <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}
