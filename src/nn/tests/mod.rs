
use crate::nn::VqaConfig;
use crate::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// 测试用的小规模配置：N = 2*2 个区域，T = 3 个单词
fn small_config() -> VqaConfig {
    VqaConfig {
        batch_size: 2,
        img_dim: 3,
        img_height: 2,
        img_width: 2,
        hidden_dim: 5,
        rnn_size: 2,
        rnn_layer: 1,
        init_bound: 0.5,
        num_output: 6,
        dropout_rate: 0.5,
        ans_vocab_size: 6,
        max_question_length: 3,
        att_hidden_dim: 4,
        att_round: 2,
        seed: 7,
    }
}

fn random_tensor(shape: &[usize], seed: u64) -> Tensor {
    Tensor::new_uniform_with_rng(-1.0, 1.0, shape, &mut StdRng::seed_from_u64(seed))
}

/// 由答案索引构造 one-hot 标签[B, width]
fn one_hot(indices: &[usize], width: usize) -> Tensor {
    let mut labels = Tensor::zeros(&[indices.len(), width]);
    for (row, &index) in indices.iter().enumerate() {
        labels[[row, index]] = 1.0;
    }
    labels
}
