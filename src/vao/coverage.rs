//! Packing of several possibly overlapping client memory ranges into one
//! contiguous buffer.

/// A run of client memory copied as one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub address: usize,
    pub len: usize,
    /// Where the run starts in the packed buffer.
    pub packed_offset: usize,
}

/// The union of a set of ranges, laid out back to back in address order.
///
/// Overlapping and touching ranges share their bytes. `offsets()` gives, for
/// every input range in input order, its byte offset in the packed buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultiCoverage {
    blocks: Vec<Block>,
    offsets: Vec<usize>,
    size: usize,
}

impl MultiCoverage {
    /// `ranges` are `(address, len)` pairs. Empty ranges get offset 0.
    pub fn new(ranges: &[(usize, usize)]) -> Self {
        let mut order: Vec<usize> = (0..ranges.len()).filter(|&i| ranges[i].1 > 0).collect();
        order.sort_by_key(|&i| ranges[i].0);

        let mut blocks: Vec<Block> = Vec::new();
        let mut offsets = vec![0; ranges.len()];
        let mut size = 0;

        for i in order {
            let (address, len) = ranges[i];
            let end = address.saturating_add(len);
            match blocks.last_mut() {
                Some(block) if address <= block.address + block.len => {
                    let block_end = block.address + block.len;
                    if end > block_end {
                        size += end - block_end;
                        block.len = end - block.address;
                    }
                    offsets[i] = block.packed_offset + (address - block.address);
                }
                _ => {
                    blocks.push(Block {
                        address,
                        len: end - address,
                        packed_offset: size,
                    });
                    offsets[i] = size;
                    size += end - address;
                }
            }
        }

        Self {
            blocks,
            offsets,
            size,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Total bytes of the packed buffer.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Copies the covered client memory into a packed buffer.
    ///
    /// # Safety
    ///
    /// Every block must describe readable memory.
    pub unsafe fn gather(&self) -> Vec<u8> {
        let mut packed = vec![0u8; self.size];
        for block in &self.blocks {
            std::ptr::copy_nonoverlapping(
                block.address as *const u8,
                packed[block.packed_offset..].as_mut_ptr(),
                block.len,
            );
        }
        packed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_ranges_pack_in_address_order() {
        let coverage = MultiCoverage::new(&[(200, 8), (100, 4), (300, 2)]);
        assert_eq!(coverage.size(), 14);
        assert_eq!(coverage.offsets(), &[4, 0, 12]);
        assert_eq!(coverage.blocks().len(), 3);
    }

    #[test]
    fn overlapping_ranges_share_bytes() {
        let coverage = MultiCoverage::new(&[(104, 8), (100, 6), (112, 4), (101, 2)]);
        assert_eq!(coverage.size(), 16);
        assert_eq!(coverage.offsets(), &[4, 0, 12, 1]);
        assert_eq!(
            coverage.blocks(),
            &[Block {
                address: 100,
                len: 16,
                packed_offset: 0
            }]
        );
    }

    #[test]
    fn empty_ranges_cover_nothing() {
        let coverage = MultiCoverage::new(&[(64, 0)]);
        assert_eq!(coverage.size(), 0);
        assert_eq!(coverage.offsets(), &[0]);
        assert!(coverage.blocks().is_empty());
    }

    #[test]
    fn gather_copies_client_memory() {
        let memory: Vec<u8> = (0..32).collect();
        let base = memory.as_ptr() as usize;
        let coverage = MultiCoverage::new(&[(base + 20, 4), (base + 2, 3), (base + 4, 2)]);
        let packed = unsafe { coverage.gather() };
        assert_eq!(packed, vec![2, 3, 4, 5, 20, 21, 22, 23]);
        assert_eq!(coverage.offsets(), &[4, 0, 2]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_range_reads_back(
                ranges in prop::collection::vec((0usize..256, 0usize..64), 1..12)
            ) {
                let memory: Vec<u8> = (0..320).map(|i| (i % 251) as u8).collect();
                let base = memory.as_ptr() as usize;
                let absolute: Vec<(usize, usize)> =
                    ranges.iter().map(|&(a, l)| (base + a, l)).collect();

                let coverage = MultiCoverage::new(&absolute);
                let packed = unsafe { coverage.gather() };
                let total: usize = ranges.iter().map(|r| r.1).sum();
                prop_assert!(coverage.size() <= total);

                for (i, &(address, len)) in ranges.iter().enumerate() {
                    let offset = coverage.offsets()[i];
                    if len > 0 {
                        prop_assert_eq!(
                            &packed[offset..offset + len],
                            &memory[address..address + len]
                        );
                    }
                }
            }
        }
    }
}
